use dockstep_core::PullImageConfig;
use dockstep_steps::ImagePuller;

use super::JobArgs;

/// Ad-hoc "Pull Docker image" step.
pub async fn pull(args: &JobArgs, image: Option<String>) -> anyhow::Result<()> {
    let (_, job) = super::load_job(args)?;

    ImagePuller::new()
        .execute(&PullImageConfig::new(image), &job)
        .await?;

    Ok(())
}
