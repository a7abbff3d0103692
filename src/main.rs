use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use gitflow_changelog::cli::{Stage, Workflow, WorkflowArgs};
use gitflow_changelog::git::Git2Repository;
use gitflow_changelog::{config, ui, ChangelogError};

#[derive(clap::Parser)]
#[command(
    name = "gitflow-changelog",
    version,
    about = "Compute the next version and changelog for a git-flow repository"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, exit_code = e.exit_code(), "run failed");
        ui::display_error(&e.to_string());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Console logging on stderr, controlled by RUST_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn run(args: &Args) -> Result<(), ChangelogError> {
    tracing::debug!(stage = %Stage::LoadConfig, "entering stage");
    let config = config::load_config(args.config.as_deref())?;

    let repo = Git2Repository::open(".")?;
    let root = repo.workdir()?.to_path_buf();

    let workflow_args = WorkflowArgs {
        dry_run: args.dry_run,
    };
    let outcome = Workflow::new(&config, &repo, root).run(&workflow_args)?;

    ui::display_outcome(&outcome);
    Ok(())
}
