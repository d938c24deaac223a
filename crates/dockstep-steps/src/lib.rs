//! Docker build steps for a CI job.
//!
//! Each step turns its configuration into one external command, runs it in
//! the job workspace with output streamed to the job log, and maps the exit
//! code to success or a [`StepError`].
//!
//! ```text
//! build-image
//!   content set        ── /bin/sh -c 'docker build -t "<image>" - <<EOF ... EOF'
//!   path is directory  ── /bin/sh -c 'docker build -t "<image>" <dir>'
//!   otherwise          ── /bin/sh -c 'docker build -t "<image>" - < <file>'
//!
//! pull-image           ── docker pull <image>
//! ```

pub mod build;
pub mod command;
pub mod context;
pub mod error;
pub mod launcher;
pub mod pull;

pub use build::{BuildStrategy, ImageBuilder};
pub use context::JobContext;
pub use error::{LaunchError, StepError};
pub use launcher::{Launcher, RealLauncher, launch_until};
pub use pull::ImagePuller;

use dockstep_core::StepConfig;

/// Run one configured step.
pub async fn run_step<L: Launcher>(
    step: &StepConfig,
    job: &JobContext,
    launcher: &L,
) -> Result<(), StepError> {
    match step {
        StepConfig::BuildImage(config) => {
            ImageBuilder::with_launcher(launcher)
                .execute(config, job)
                .await
        }
        StepConfig::PullImage(config) => {
            ImagePuller::with_launcher(launcher)
                .execute(config, job)
                .await
        }
    }
}
