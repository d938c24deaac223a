mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockstep", about = "Build and pull Docker images as CI job steps")]
#[command(version)]
struct Cli {
    /// Job workspace (module root); step commands run here
    #[arg(long, short = 'w', global = true, env = "DOCKSTEP_WORKSPACE", default_value = ".")]
    workspace: PathBuf,
    /// Job file (default: <workspace>/dockstep.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,
    /// Project name used to derive default image names
    #[arg(long, global = true, env = "JOB_NAME")]
    project: Option<String>,
    /// Name of the build node
    #[arg(long, global = true, env = "NODE_NAME")]
    node: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the steps defined in the job file
    Run {
        /// Only run these steps (whitespace-separated numbers or step types)
        #[arg(long, env = "DOCKSTEP_ONLY")]
        only: Option<String>,
    },
    /// Build a Docker image
    Build {
        /// Directory containing a Dockerfile, or a Dockerfile path (default: .)
        #[arg(long, short = 'f')]
        file: Option<String>,
        /// Image name (default: jenkins/<project>)
        #[arg(long, short = 't')]
        image: Option<String>,
        /// Inline Dockerfile content; takes precedence over --file
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        /// Read inline Dockerfile content from this file
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Pull a Docker image
    Pull {
        /// Image to pull
        image: Option<String>,
    },
    /// Show derived defaults and the commands each step would run
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let job = commands::JobArgs {
        workspace: cli.workspace,
        config: cli.config,
        project: cli.project,
        node: cli.node,
    };

    match cli.command {
        Commands::Run { only } => commands::run(&job, only.as_deref()).await?,
        Commands::Build {
            file,
            image,
            content,
            content_file,
        } => commands::build(&job, file, image, content, content_file).await?,
        Commands::Pull { image } => commands::pull(&job, image).await?,
        Commands::Info => commands::info(&job).await?,
    }

    Ok(())
}
