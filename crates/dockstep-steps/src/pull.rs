//! The "Pull Docker image" step. Delegates to `docker pull`.

use dockstep_core::PullImageConfig;

use crate::context::JobContext;
use crate::error::StepError;
use crate::launcher::{Launcher, RealLauncher};

pub struct ImagePuller<L: Launcher = RealLauncher> {
    launcher: L,
}

impl ImagePuller<RealLauncher> {
    pub fn new() -> Self {
        Self {
            launcher: RealLauncher,
        }
    }
}

impl Default for ImagePuller<RealLauncher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher> ImagePuller<L> {
    pub fn with_launcher(launcher: L) -> Self {
        Self { launcher }
    }

    /// Pull the configured image. Fails without launching anything when no
    /// image is set.
    pub async fn execute(
        &self,
        config: &PullImageConfig,
        job: &JobContext,
    ) -> Result<(), StepError> {
        if !config.is_image_defined() {
            return Err(StepError::NoImageDefined);
        }
        let image = config.image().unwrap_or_default();

        tracing::info!("Attempting to pull image '{image}' from docker repository");

        // No redirection involved, so no shell.
        let cmd = pull_command(image);
        let code = self.launcher.launch(&cmd, &job.workspace).await?;

        if code != 0 {
            return Err(StepError::Pull {
                image: image.to_owned(),
                code,
            });
        }

        tracing::info!(image = %image, "docker image pulled");
        Ok(())
    }
}

pub fn pull_command(image: &str) -> Vec<String> {
    vec!["docker".to_owned(), "pull".to_owned(), image.to_owned()]
}
