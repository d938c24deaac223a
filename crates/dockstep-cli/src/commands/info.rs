use dockstep_core::naming::derive_image_name;
use dockstep_core::{BuildImageConfig, PullImageConfig, StepConfig, StepKind};
use dockstep_steps::JobContext;
use dockstep_steps::build::{BuildStrategy, DEFAULT_BUILD_FILE, build_command};
use dockstep_steps::command::join_command;
use dockstep_steps::pull::pull_command;

use super::JobArgs;

/// Show the resolved job context and the command each step would run.
pub async fn info(args: &JobArgs) -> anyhow::Result<()> {
    let (config, job) = super::load_job(args)?;

    println!("Workspace:     {}", job.workspace.display());
    println!("Project:       {}", job.project.name);
    println!("Job kind:      {}", config.job.kind);
    println!("Hostname:      {}", job.hostname());
    println!("Default image: {}", derive_image_name(&job.project));

    // arch-lint: allow(no-error-swallowing) reason="info reports the problem; run enforces it"
    if let Err(e) = config.validate() {
        println!();
        println!("Warning: {e}");
    }

    println!();
    if config.steps.is_empty() {
        println!("No steps defined.");
        return Ok(());
    }

    println!("Steps:");
    for (i, step) in config.steps.iter().enumerate() {
        let (label, command) = describe(step, &job);
        println!("  {}. {label}", i + 1);
        println!("     {command}");
    }

    Ok(())
}

fn describe(step: &StepConfig, job: &JobContext) -> (String, String) {
    match step {
        StepConfig::BuildImage(config) => describe_build(config, job),
        StepConfig::PullImage(config) => describe_pull(config),
    }
}

fn describe_build(config: &BuildImageConfig, job: &JobContext) -> (String, String) {
    let build_file = config.build_file_or(DEFAULT_BUILD_FILE);
    let image = config.image_or(|| derive_image_name(&job.project));
    let strategy = BuildStrategy::select(config.effective_content(), build_file, &job.workspace);
    let tokens = build_command(&image, &strategy);

    (
        format!("{} ({})", StepKind::BuildImage.display_name(), strategy.name()),
        join_command(tokens.iter().map(|t| Some(t.as_str()))),
    )
}

fn describe_pull(config: &PullImageConfig) -> (String, String) {
    let label = StepKind::PullImage.display_name().to_owned();
    match config.image().filter(|_| config.is_image_defined()) {
        Some(image) => (label, pull_command(image).join(" ")),
        None => (label, "(no image defined — step will fail)".to_owned()),
    }
}
