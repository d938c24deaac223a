use dockstep_core::{StepConfig, StepKind};
use dockstep_core::naming::tokenize;
use dockstep_steps::{RealLauncher, run_step};

use super::JobArgs;

/// Run the job file's steps in order, stopping at the first failure.
pub async fn run(args: &JobArgs, only: Option<&str>) -> anyhow::Result<()> {
    let (config, job) = super::load_job(args)?;
    config.validate()?;

    let selected = select_steps(&config.steps, only)?;
    if selected.is_empty() {
        println!("No steps to run.");
        return Ok(());
    }

    let launcher = RealLauncher;
    let total = selected.len();

    for (n, (index, step)) in selected.into_iter().enumerate() {
        let name = step.kind().display_name();
        println!("[{}/{total}] {name}", n + 1);

        if let Err(e) = run_step(step, &job, &launcher).await {
            let context = match e.exit_code() {
                Some(code) => format!("step #{index} '{name}' failed (exit code {code})"),
                None => format!("step #{index} '{name}' failed"),
            };
            return Err(anyhow::Error::new(e).context(context));
        }
    }

    println!("All {total} step(s) succeeded.");
    Ok(())
}

/// A `--only` token: a 1-based step number or a step type.
#[derive(Debug, PartialEq, Eq)]
enum StepFilter {
    Index(usize),
    Kind(StepKind),
}

impl StepFilter {
    fn parse(token: &str, count: usize) -> anyhow::Result<Self> {
        let unknown =
            || anyhow::anyhow!("unknown step '{token}' — use a step number (1-{count}) or a step type");

        let filter = match token {
            "build-image" => Self::Kind(StepKind::BuildImage),
            "pull-image" => Self::Kind(StepKind::PullImage),
            _ => Self::Index(token.parse().map_err(|_| unknown())?),
        };

        if let Self::Index(i) = filter
            && !(1..=count).contains(&i)
        {
            return Err(unknown());
        }
        Ok(filter)
    }

    fn matches(&self, index: usize, step: &StepConfig) -> bool {
        match self {
            Self::Index(i) => *i == index,
            Self::Kind(kind) => *kind == step.kind(),
        }
    }
}

/// Filter steps by a whitespace-separated list of [`StepFilter`] tokens,
/// keeping job order. Returns `(index, step)` pairs.
fn select_steps<'a>(
    steps: &'a [StepConfig],
    only: Option<&str>,
) -> anyhow::Result<Vec<(usize, &'a StepConfig)>> {
    let filters = tokenize(only)
        .iter()
        .map(|t| StepFilter::parse(t, steps.len()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(steps
        .iter()
        .enumerate()
        .map(|(i, s)| (i + 1, s))
        .filter(|(i, step)| filters.is_empty() || filters.iter().any(|f| f.matches(*i, step)))
        .collect())
}
