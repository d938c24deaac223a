//! Default names derived from job identity.

use crate::job::{NodeInfo, ProjectIdentity};

/// Prefix for image names derived from a project.
pub const IMAGE_PREFIX: &str = "jenkins/";

/// Hostname used when the build node has no usable display name.
pub const DEFAULT_HOSTNAME: &str = "jenkins.docker.io";

/// Image name shared by every build of a project: `jenkins/<project>`.
///
/// # Examples
///
/// ```
/// use dockstep_core::{ProjectIdentity, naming::derive_image_name};
///
/// assert_eq!(derive_image_name(&ProjectIdentity::new("foo")), "jenkins/foo");
/// ```
pub fn derive_image_name(project: &ProjectIdentity) -> String {
    format!("{IMAGE_PREFIX}{}", project.name)
}

/// Hostname for the node, or [`DEFAULT_HOSTNAME`] if it can't be determined.
pub fn derive_hostname(node: Option<&NodeInfo>) -> String {
    node.and_then(|n| n.display_name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_HOSTNAME)
        .to_owned()
}

/// Split on whitespace, dropping empty tokens.
pub fn tokenize(input: Option<&str>) -> Vec<String> {
    input
        .map(|s| s.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}
