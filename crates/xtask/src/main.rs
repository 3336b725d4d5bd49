//! Development tasks for the squad tactical core
//!
//! This binary runs the decision core against scenario files.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Decide, Field, Scenarios};

/// Development tasks for the squad tactical core
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the squad tactical core", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run one decision cycle for units of a scenario
    Decide(Decide),

    /// Render the influence field of a scenario
    Field(Field),

    /// List bundled or local scenarios
    Scenarios(Scenarios),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG and SQUAD_DATA_DIR)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Decide(cmd) => cmd.execute(),
        Command::Field(cmd) => cmd.execute(),
        Command::Scenarios(cmd) => cmd.execute(),
    }
}
