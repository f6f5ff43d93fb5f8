// viewsmith/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug viewsmith recreate ... pour voir les détails
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recreate {
            project_dir,
            dry_run,
        } => commands::recreate::execute(project_dir, dry_run).await,

        Commands::Plan {
            project_dir,
            format,
        } => commands::plan::execute(project_dir, format).await,
    }
}
