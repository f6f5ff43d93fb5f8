// viewsmith/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "viewsmith")]
#[command(about = "Drops and recreates database views in dependency order", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔁 Drops every view (reverse order) then recreates it from its SQL script
    Recreate {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Print the statements without executing them
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// 🧠 Shows the computed view order without touching the schema
    Plan {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
