mod build;
mod info;
mod pull;
mod run;

use anyhow::Context;
use dockstep_core::{JobConfig, NodeInfo, ProjectIdentity};
use dockstep_steps::JobContext;
use std::path::{Path, PathBuf};

pub use build::build;
pub use info::info;
pub use pull::pull;
pub use run::run;

/// Where the job lives and who it is, as handed over by the CI host.
pub struct JobArgs {
    pub workspace: PathBuf,
    pub config: Option<PathBuf>,
    pub project: Option<String>,
    pub node: Option<String>,
}

/// Load the job file and build the execution context for this run.
pub(crate) fn load_job(args: &JobArgs) -> anyhow::Result<(JobConfig, JobContext)> {
    let config = match &args.config {
        Some(path) => JobConfig::load_file(path)?,
        None => JobConfig::load(&args.workspace)?,
    };

    let workspace = args
        .workspace
        .canonicalize()
        .with_context(|| format!("workspace {} is not accessible", args.workspace.display()))?;

    let project = resolve_project_name(args.project.as_deref(), &config, &workspace)?;
    let node = non_empty(args.node.as_deref())
        .map(NodeInfo::named)
        .or_else(|| config.node.clone());

    tracing::debug!(
        workspace = %workspace.display(),
        project = %project,
        "job context resolved"
    );

    let job = JobContext::new(workspace, ProjectIdentity::new(project)).with_node(node);
    Ok((config, job))
}

/// Project name priority:
/// 1. `--project` / `JOB_NAME`
/// 2. `[job].name` in the job file
/// 3. Workspace directory name
fn resolve_project_name(
    flag: Option<&str>,
    config: &JobConfig,
    workspace: &Path,
) -> anyhow::Result<String> {
    if let Some(name) = non_empty(flag).or_else(|| non_empty(config.job.name.as_deref())) {
        return Ok(name.to_owned());
    }

    workspace
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "cannot derive a project name from {} — set [job].name or pass --project",
                workspace.display()
            )
        })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
