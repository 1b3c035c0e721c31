//! Simulate command - run an experiment with a mix of player kinds

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    actor::{ActorKind, ActorParams},
    board::Board,
    cli::output::{print_kv, print_section, print_subsection, print_summary},
    experiment::{Experiment, ExperimentConfig, SeedPolicy},
    observer::{JsonlObserver, ProgressObserver},
    stats::ExperimentReport,
};

#[derive(Parser, Debug)]
#[command(about = "Run many games between a field of players")]
pub struct SimulateArgs {
    /// Player kinds in turn order (standard, resilient, lazy)
    #[arg(required = true)]
    pub players: Vec<String>,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// When the seed is applied: per-game or per-experiment
    #[arg(long, default_value = "per-game")]
    pub seed_policy: String,

    /// Shuffle the turn order before every game
    #[arg(long)]
    pub randomize: bool,

    /// Squares a resilient player walks after a chute
    #[arg(long, default_value_t = 1)]
    pub extra_steps: i32,

    /// Squares a lazy player gives back after a ladder
    #[arg(long, default_value_t = 1)]
    pub dropped_steps: i32,

    /// Abort any game longer than this many moves
    #[arg(long)]
    pub max_moves: Option<usize>,

    /// JSON board description (defaults to the classic layout)
    #[arg(long)]
    pub board: Option<PathBuf>,

    /// Write the aggregate report as JSON
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write one JSON line per game
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

impl SimulateArgs {
    /// Experiment configuration described by these arguments
    pub fn experiment_config(&self) -> Result<ExperimentConfig> {
        let seed_policy: SeedPolicy = self.seed_policy.parse()?;
        let params = ActorParams::default()
            .with_extra_steps(self.extra_steps)
            .with_dropped_steps(self.dropped_steps);

        let mut config = ExperimentConfig::from_tags(&self.players)?
            .with_seed_policy(seed_policy)
            .with_randomized_order(self.randomize)
            .with_params(params);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(limit) = self.max_moves {
            config = config.with_move_limit(limit);
        }
        Ok(config)
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let report = run(&args)?;
    print_report(&report);

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}

/// Build the experiment, play every game and return the aggregate report
pub fn run(args: &SimulateArgs) -> Result<ExperimentReport> {
    let board = match &args.board {
        Some(path) => Board::from_json_file(path)?,
        None => Board::default(),
    };
    let config = args.experiment_config()?;

    let mut experiment = Experiment::new(board, config)?;
    if args.progress {
        experiment = experiment.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.trace {
        experiment = experiment.with_observer(Box::new(JsonlObserver::create(path)?));
    }

    experiment.run(args.games)?;
    Ok(experiment.report())
}

fn print_report(report: &ExperimentReport) {
    print_section("Simulation Results");
    print_kv("Total games", &report.total_games.to_string());

    for kind in ActorKind::ALL {
        let Some(entry) = report.kinds.get(&kind) else {
            continue;
        };
        if entry.participants == 0 && entry.wins == 0 {
            continue;
        }
        print_subsection(&format!("{kind} players"));
        print_kv("Participants", &entry.participants.to_string());
        print_kv(
            "Wins",
            &format!("{} ({:.1}%)", entry.wins, entry.win_share * 100.0),
        );
        print_summary(entry.durations.as_ref());
    }

    print_subsection("All games");
    print_summary(report.overall.as_ref());
}
