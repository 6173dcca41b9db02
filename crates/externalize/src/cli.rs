use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "externalize")]
#[command(version)]
#[command(about = "Decide where domain events are externalized to")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route JSON events through the settings and print target/payload records
    Route {
        /// Settings file (JSON)
        #[arg(short, long)]
        settings: PathBuf,

        /// Events as JSON lines (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate a settings file
    Check {
        /// Settings file (JSON)
        #[arg(short, long)]
        settings: PathBuf,
    },

    /// Print version information
    Version,
}
