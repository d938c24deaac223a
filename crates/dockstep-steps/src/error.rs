/// Failure to run a command through a [`Launcher`](crate::Launcher).
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("no command given to launch")]
    EmptyCommand,

    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed while waiting for the child process")]
    Wait { source: std::io::Error },

    #[error("interrupted while waiting for the child process")]
    Interrupted,
}

/// Why a build step aborted the job.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("No docker image defined.  The 'Pull Docker image' build step requires a image.")]
    NoImageDefined,

    #[error("Unable to build docker content: '{content}'")]
    BuildContent { content: String, code: i32 },

    #[error("Unable to build docker file: '{path}'")]
    BuildFile { path: String, code: i32 },

    #[error("Unable to pull docker image: '{image}'")]
    Pull { image: String, code: i32 },

    #[error("step interrupted")]
    Interrupted,

    #[error("failed to run step command")]
    Io { source: LaunchError },
}

impl StepError {
    /// Exit code of the docker command, when it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::BuildContent { code, .. } | Self::BuildFile { code, .. } | Self::Pull { code, .. } => {
                Some(*code)
            }
            Self::NoImageDefined | Self::Interrupted | Self::Io { .. } => None,
        }
    }
}

impl From<LaunchError> for StepError {
    fn from(e: LaunchError) -> Self {
        match e {
            LaunchError::Interrupted => Self::Interrupted,
            source => Self::Io { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interruption_is_not_an_io_failure() {
        let err = StepError::from(LaunchError::Interrupted);
        assert!(matches!(err, StepError::Interrupted));
    }

    #[test]
    fn spawn_failure_is_io() {
        let err = StepError::from(LaunchError::Spawn {
            program: "docker".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert!(matches!(err, StepError::Io { .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn failure_messages_name_the_input() {
        let err = StepError::BuildFile {
            path: "docker/Dockerfile".to_owned(),
            code: 1,
        };
        assert_eq!(err.to_string(), "Unable to build docker file: 'docker/Dockerfile'");
        assert_eq!(err.exit_code(), Some(1));

        let err = StepError::Pull {
            image: "busybox".to_owned(),
            code: 137,
        };
        assert_eq!(err.to_string(), "Unable to pull docker image: 'busybox'");
        assert_eq!(err.exit_code(), Some(137));
    }
}
