use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::job::{JobKind, NodeInfo, StepKind};

/// Default job file name, looked up in the workspace root.
pub const JOB_FILE_NAME: &str = "dockstep.toml";

/// dockstep.toml job definition.
///
/// Every field is optional so that files written by older versions keep
/// loading; anything missing falls back to its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub job: JobSection,
    #[serde(default)]
    pub node: Option<NodeInfo>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSection {
    /// Project name (defaults to the workspace directory name)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: JobKind,
}

/// One configured step, tagged by `type` in the job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepConfig {
    BuildImage(BuildImageConfig),
    PullImage(PullImageConfig),
}

impl StepConfig {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::BuildImage(_) => StepKind::BuildImage,
            Self::PullImage(_) => StepKind::PullImage,
        }
    }
}

/// Settings for the "Build Docker image" step.
///
/// Non-empty `content` always wins over `build_file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildImageConfig {
    /// Directory containing a Dockerfile, or a Dockerfile path
    #[serde(default, alias = "docker_file")]
    build_file: Option<String>,
    /// Tag for the built image
    #[serde(default, alias = "docker_image")]
    image: Option<String>,
    /// Inline Dockerfile text
    #[serde(default, alias = "docker_content")]
    content: Option<String>,
}

impl BuildImageConfig {
    pub fn new(build_file: Option<String>, image: Option<String>, content: Option<String>) -> Self {
        Self {
            build_file,
            image,
            content,
        }
    }

    /// Configured build file. This may be `None`.
    pub fn build_file(&self) -> Option<&str> {
        self.build_file.as_deref()
    }

    /// Configured image name. This may be `None`.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Inline Dockerfile content. This may be `None`.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Inline content, if set and non-empty.
    pub fn effective_content(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }

    pub fn build_file_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(self.build_file.as_deref()).unwrap_or(default)
    }

    pub fn image_or(&self, default: impl FnOnce() -> String) -> String {
        non_empty(self.image.as_deref())
            .map(str::to_owned)
            .unwrap_or_else(default)
    }
}

/// Settings for the "Pull Docker image" step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullImageConfig {
    #[serde(default, alias = "docker_image")]
    image: Option<String>,
}

impl PullImageConfig {
    pub fn new(image: Option<String>) -> Self {
        Self { image }
    }

    /// Configured image name. This may be `None`.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_image_defined(&self) -> bool {
        non_empty(self.image.as_deref()).is_some()
    }
}

impl JobConfig {
    /// Load `dockstep.toml` from the workspace, or return defaults if not found.
    pub fn load(workspace: &Path) -> crate::Result<Self> {
        let path = workspace.join(JOB_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no job file; using defaults");
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load a job file from an explicit path. The file must exist.
    pub fn load_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: PathBuf::from(path),
            source: e,
        })?;

        tracing::debug!(
            path = %path.display(),
            kind = %config.job.kind,
            steps = config.steps.len(),
            "job file loaded"
        );
        Ok(config)
    }

    /// Check that every configured step supports this job's kind.
    pub fn validate(&self) -> crate::Result<()> {
        let kind = self.job.kind;
        for (i, step) in self.steps.iter().enumerate() {
            if !step.kind().is_applicable(kind) {
                return Err(crate::Error::NotApplicable {
                    index: i + 1,
                    step: step.kind(),
                    kind,
                });
            }
        }
        Ok(())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
