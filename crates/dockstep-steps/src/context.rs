use std::path::PathBuf;

use dockstep_core::naming::derive_hostname;
use dockstep_core::{NodeInfo, ProjectIdentity};

/// Per-execution snapshot handed to a step by the host.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Module root; steps run their command here.
    pub workspace: PathBuf,
    pub project: ProjectIdentity,
    pub node: Option<NodeInfo>,
}

impl JobContext {
    pub fn new(workspace: impl Into<PathBuf>, project: ProjectIdentity) -> Self {
        Self {
            workspace: workspace.into(),
            project,
            node: None,
        }
    }

    pub fn with_node(mut self, node: Option<NodeInfo>) -> Self {
        self.node = node;
        self
    }

    pub fn hostname(&self) -> String {
        derive_hostname(self.node.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_falls_back_without_node() {
        let job = JobContext::new("/tmp", ProjectIdentity::new("foo"));
        assert_eq!(job.hostname(), "jenkins.docker.io");
    }

    #[test]
    fn hostname_from_node() {
        let job = JobContext::new("/tmp", ProjectIdentity::new("foo"))
            .with_node(Some(NodeInfo::named("slave1")));
        assert_eq!(job.hostname(), "slave1");
    }
}
