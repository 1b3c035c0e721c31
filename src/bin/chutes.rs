//! Chutes and ladders CLI
//!
//! - `simulate`: run experiments with any mix of standard, resilient and lazy players
//! - `classic`: game length statistics for plain players on the classic board

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chutes")]
#[command(version, about = "Chutes and ladders simulator", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an experiment with a field of player kinds
    Simulate(chutes::cli::commands::simulate::SimulateArgs),

    /// Shortest, longest, median, mean and spread of classic games
    Classic(chutes::cli::commands::classic::ClassicArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate(args) => chutes::cli::commands::simulate::execute(args),
        Commands::Classic(args) => chutes::cli::commands::classic::execute(args),
    }
}
