//! Identity of the job a step runs in, and which job kinds each step supports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The project being built. Default image names are derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub name: String,
}

impl ProjectIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The build node a step executes on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NodeInfo {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
        }
    }
}

/// Kind of job declared in the job file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    #[default]
    FreeStyle,
    Pipeline,
    Matrix,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FreeStyle => "freestyle",
            Self::Pipeline => "pipeline",
            Self::Matrix => "matrix",
        };
        f.write_str(s)
    }
}

/// The step types this crate knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    BuildImage,
    PullImage,
}

impl StepKind {
    /// Name shown to users in job listings and errors.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::BuildImage => "Build Docker image",
            Self::PullImage => "Pull Docker image",
        }
    }

    /// Job kinds this step may be attached to.
    pub fn applicable_kinds(self) -> &'static [JobKind] {
        match self {
            Self::BuildImage | Self::PullImage => &[JobKind::FreeStyle],
        }
    }

    pub fn is_applicable(self, kind: JobKind) -> bool {
        self.applicable_kinds().contains(&kind)
    }
}
