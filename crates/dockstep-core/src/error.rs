use std::path::PathBuf;

use crate::job::{JobKind, StepKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load job config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse job config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "step #{index} '{}' cannot be used in a {kind} job — supported: {}",
        step.display_name(),
        format_kinds(step.applicable_kinds())
    )]
    NotApplicable {
        index: usize,
        step: StepKind,
        kind: JobKind,
    },
}

fn format_kinds(kinds: &[JobKind]) -> String {
    if kinds.is_empty() {
        "(none)".to_owned()
    } else {
        kinds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
