//! The "Build Docker image" step.
//!
//! There are two ways to hand docker a Dockerfile, and they differ in what
//! the build context is:
//!
//! - a directory containing a `Dockerfile`: everything under that directory
//!   is available to `ADD`/`COPY`, nothing above it
//! - stdin (`-`): there is no context, so local `ADD` does not work
//!
//! Inline content and plain files both go through stdin; only a directory
//! gives the build a context.

use std::path::Path;

use dockstep_core::BuildImageConfig;
use dockstep_core::naming::derive_image_name;

use crate::command::{join_command, shell_wrap};
use crate::context::JobContext;
use crate::error::StepError;
use crate::launcher::{Launcher, RealLauncher};

/// Build file used when none is configured.
pub const DEFAULT_BUILD_FILE: &str = ".";

/// How the Dockerfile is handed to `docker build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy<'a> {
    /// Inline text fed through a heredoc.
    Content(&'a str),
    /// Directory passed as the build context.
    Directory(&'a str),
    /// File redirected into stdin.
    File(&'a str),
}

impl<'a> BuildStrategy<'a> {
    /// Pick the strategy: non-empty content, then an existing directory
    /// (relative to `workspace`), then a file.
    ///
    /// A path that doesn't exist is treated as a file and left for docker to
    /// reject.
    pub fn select(content: Option<&'a str>, build_file: &'a str, workspace: &Path) -> Self {
        match content.filter(|c| !c.is_empty()) {
            Some(content) => Self::Content(content),
            None if workspace.join(build_file).is_dir() => Self::Directory(build_file),
            None => Self::File(build_file),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::Directory(_) => "directory",
            Self::File(_) => "file",
        }
    }

    /// Tokens that follow `docker build -t "<image>"`.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Content(content) => vec!["-".to_owned(), format!("<<EOF\n{content}\nEOF")],
            Self::Directory(dir) => vec![(*dir).to_owned()],
            Self::File(file) => vec!["-".to_owned(), "<".to_owned(), (*file).to_owned()],
        }
    }

    fn failure(&self, code: i32) -> StepError {
        match self {
            Self::Content(content) => StepError::BuildContent {
                content: (*content).to_owned(),
                code,
            },
            Self::Directory(path) | Self::File(path) => StepError::BuildFile {
                path: (*path).to_owned(),
                code,
            },
        }
    }
}

/// Full `docker build` token list for an image and strategy.
pub fn build_command(image: &str, strategy: &BuildStrategy<'_>) -> Vec<String> {
    let mut cmd = vec![
        "docker".to_owned(),
        "build".to_owned(),
        "-t".to_owned(),
        format!("\"{image}\""),
    ];
    cmd.extend(strategy.args());
    cmd
}

/// Runs `docker build` through a shell, parameterized over the launcher for
/// testability.
pub struct ImageBuilder<L: Launcher = RealLauncher> {
    launcher: L,
}

impl ImageBuilder<RealLauncher> {
    pub fn new() -> Self {
        Self {
            launcher: RealLauncher,
        }
    }
}

impl Default for ImageBuilder<RealLauncher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher> ImageBuilder<L> {
    pub fn with_launcher(launcher: L) -> Self {
        Self { launcher }
    }

    pub async fn execute(
        &self,
        config: &BuildImageConfig,
        job: &JobContext,
    ) -> Result<(), StepError> {
        let build_file = config.build_file_or(DEFAULT_BUILD_FILE);
        let image = config.image_or(|| derive_image_name(&job.project));

        tracing::info!("Attempting to create Docker image '{image}' with build file '{build_file}'");

        let strategy =
            BuildStrategy::select(config.effective_content(), build_file, &job.workspace);
        let tokens = build_command(&image, &strategy);
        let command_line = join_command(tokens.iter().map(|t| Some(t.as_str())));

        tracing::debug!(
            strategy = strategy.name(),
            command = %command_line,
            workspace = %job.workspace.display(),
            "launching docker build"
        );

        let code = self
            .launcher
            .launch(&shell_wrap(command_line), &job.workspace)
            .await?;

        if code != 0 {
            tracing::debug!(code, strategy = strategy.name(), "docker build failed");
            return Err(strategy.failure(code));
        }

        tracing::info!(image = %image, "docker image built");
        Ok(())
    }
}
