mod cli;
mod commands;
mod inbound;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the routed records
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route { settings, input } => commands::route::run(&settings, input.as_deref()),
        Commands::Check { settings } => commands::check::run(&settings),
        Commands::Version => commands::version::run(),
    }
}
