use anyhow::Context;
use dockstep_core::BuildImageConfig;
use dockstep_steps::ImageBuilder;
use std::path::PathBuf;

use super::JobArgs;

/// Ad-hoc "Build Docker image" step, configured from flags.
pub async fn build(
    args: &JobArgs,
    file: Option<String>,
    image: Option<String>,
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (_, job) = super::load_job(args)?;

    let content = match content_file {
        Some(path) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => content,
    };

    let config = BuildImageConfig::new(file, image, content);
    ImageBuilder::new().execute(&config, &job).await?;

    Ok(())
}
