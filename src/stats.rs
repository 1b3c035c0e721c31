//! Summary statistics over game durations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use crate::{actor::ActorKind, game::GameRecord};

/// Distribution of game lengths, in individual moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationSummary {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub median: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` below two games.
    pub std_dev: Option<f64>,
}

impl DurationSummary {
    /// Summarise a list of move counts. `None` when the list is empty.
    pub fn from_moves(moves: &[usize]) -> Option<Self> {
        let min = Iterator::min(moves.iter().copied())?;
        let max = Iterator::max(moves.iter().copied())?;
        let values: Vec<f64> = moves.iter().map(|&m| m as f64).collect();

        let mean = values.iter().mean();
        let std_dev = (values.len() > 1).then(|| values.iter().std_dev());
        let median = Data::new(values).median();

        Some(Self {
            count: moves.len(),
            min,
            max,
            median,
            mean,
            std_dev,
        })
    }
}

/// Per-kind slice of an experiment report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindReport {
    pub participants: usize,
    pub wins: usize,
    /// Fraction of all games won by this kind.
    pub win_share: f64,
    pub durations: Option<DurationSummary>,
}

/// Aggregate view of every game an experiment has played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub total_games: usize,
    pub kinds: BTreeMap<ActorKind, KindReport>,
    pub overall: Option<DurationSummary>,
}

impl ExperimentReport {
    pub fn new(
        results: &[GameRecord],
        participants: &BTreeMap<ActorKind, usize>,
        wins: &BTreeMap<ActorKind, usize>,
        durations: &BTreeMap<ActorKind, Vec<usize>>,
    ) -> Self {
        let total_games = results.len();
        let kinds = ActorKind::ALL
            .into_iter()
            .map(|kind| {
                let won = wins.get(&kind).copied().unwrap_or(0);
                let report = KindReport {
                    participants: participants.get(&kind).copied().unwrap_or(0),
                    wins: won,
                    win_share: if total_games == 0 {
                        0.0
                    } else {
                        won as f64 / total_games as f64
                    },
                    durations: durations
                        .get(&kind)
                        .and_then(|moves| DurationSummary::from_moves(moves)),
                };
                (kind, report)
            })
            .collect();

        let all_moves: Vec<usize> = results.iter().map(|record| record.moves).collect();

        Self {
            total_games,
            kinds,
            overall: DurationSummary::from_moves(&all_moves),
        }
    }
}
