//! Classic command - plain players, one seed for the whole run

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    actor::ActorKind,
    board::Board,
    cli::output::{print_section, print_summary},
    experiment::{Experiment, ExperimentConfig, SeedPolicy},
    stats::DurationSummary,
};

#[derive(Parser, Debug)]
#[command(about = "Game length statistics for standard players on the classic board")]
pub struct ClassicArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Number of standard players per game
    #[arg(long, short = 'p', default_value_t = 4)]
    pub players: usize,

    /// Seed applied once before the first game
    #[arg(long, default_value_t = 89)]
    pub seed: u64,
}

pub fn execute(args: ClassicArgs) -> Result<()> {
    let summary = run(&args)?;
    print_section(&format!(
        "{} games, {} players, seed {}",
        args.games, args.players, args.seed
    ));
    print_summary(summary.as_ref());
    Ok(())
}

/// Game lengths of `args.games` classic games
pub fn run(args: &ClassicArgs) -> Result<Option<DurationSummary>> {
    if args.players == 0 {
        bail!("Need at least 1 player");
    }

    let config = ExperimentConfig::new(vec![ActorKind::Standard; args.players])
        .with_seed(args.seed)
        .with_seed_policy(SeedPolicy::PerExperiment);
    let mut experiment = Experiment::new(Board::default(), config)?;
    let moves: Vec<usize> = experiment
        .run(args.games)?
        .iter()
        .map(|record| record.moves)
        .collect();

    Ok(DurationSummary::from_moves(&moves))
}
