//! Batches of independent games and their per-kind aggregates

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    actor::{Actor, ActorKind, ActorParams},
    board::Board,
    die::RandomDie,
    game::{Game, GameRecord},
    observer::Observer,
    stats::ExperimentReport,
};

/// When the configured seed is applied to the die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Re-seed before every game; every game replays the same roll sequence.
    #[default]
    PerGame,
    /// Seed once; rolls keep flowing from game to game.
    PerExperiment,
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeedPolicy::PerGame => "per-game",
            SeedPolicy::PerExperiment => "per-experiment",
        };
        f.write_str(label)
    }
}

impl FromStr for SeedPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-game" | "per_game" | "game" => Ok(SeedPolicy::PerGame),
            "per-experiment" | "per_experiment" | "experiment" | "once" => {
                Ok(SeedPolicy::PerExperiment)
            }
            _ => Err(Error::ParseSeedPolicy {
                input: s.to_string(),
                expected: "per-game, per-experiment".to_string(),
            }),
        }
    }
}

/// Configuration for an experiment
///
/// # Examples
///
/// ```
/// use chutes::{ActorKind, ExperimentConfig, SeedPolicy};
///
/// let config = ExperimentConfig::new(vec![ActorKind::Standard, ActorKind::Lazy])
///     .with_seed(42)
///     .with_seed_policy(SeedPolicy::PerExperiment)
///     .with_randomized_order(true);
/// assert_eq!(config.kinds.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Actor kinds in turn order, one entry per seat.
    pub kinds: Vec<ActorKind>,
    pub seed: Option<u64>,
    pub seed_policy: SeedPolicy,
    /// Shuffle the turn order once before each game.
    pub randomize_order: bool,
    pub params: ActorParams,
    /// Abort a game that runs past this many moves.
    pub max_moves: Option<usize>,
}

impl ExperimentConfig {
    pub fn new(kinds: Vec<ActorKind>) -> Self {
        Self {
            kinds,
            seed: None,
            seed_policy: SeedPolicy::default(),
            randomize_order: false,
            params: ActorParams::default(),
            max_moves: None,
        }
    }

    /// Parse actor kinds from their names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownActorKind`] for the first unrecognised name.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Result<Self> {
        let kinds = tags
            .iter()
            .map(|tag| tag.as_ref().parse())
            .collect::<Result<Vec<ActorKind>>>()?;
        Ok(Self::new(kinds))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    pub fn with_randomized_order(mut self, randomize: bool) -> Self {
        self.randomize_order = randomize;
        self
    }

    pub fn with_params(mut self, params: ActorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_move_limit(mut self, limit: usize) -> Self {
        self.max_moves = Some(limit);
        self
    }
}

/// Runs games on one board and accumulates their outcomes
pub struct Experiment {
    board: Board,
    config: ExperimentConfig,
    die: RandomDie,
    results: Vec<GameRecord>,
    observers: Vec<Box<dyn Observer>>,
}

impl Experiment {
    /// # Errors
    ///
    /// Returns [`Error::NoActors`] if the configuration has no actor kinds, and
    /// [`Error::InvalidConfiguration`] for out-of-range actor parameters or a
    /// zero move limit.
    pub fn new(board: Board, config: ExperimentConfig) -> Result<Self> {
        if config.kinds.is_empty() {
            return Err(Error::NoActors);
        }
        config.params.validate()?;
        if config.max_moves == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "max_moves must be at least 1".to_string(),
            });
        }
        let die = RandomDie::new(config.seed);
        Ok(Self {
            board,
            config,
            die,
            results: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// Attach an observer notified about every game.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Play `n` games, append them to the accumulated results and return them.
    ///
    /// If a game fails, the games completed before it stay in [`results`],
    /// observers still get `on_experiment_end`, and the game's error is
    /// returned.
    ///
    /// [`results`]: Experiment::results
    pub fn run(&mut self, n: usize) -> Result<Vec<GameRecord>> {
        info!(
            games = n,
            actors = self.config.kinds.len(),
            seed = ?self.config.seed,
            policy = %self.config.seed_policy,
            "starting experiment"
        );
        for observer in &mut self.observers {
            observer.on_experiment_start(n)?;
        }

        let start = self.results.len();
        if let Err(err) = self.play_batch(n) {
            let played = self.results.len() - start;
            warn!(played, games = n, error = %err, "experiment aborted");
            for observer in &mut self.observers {
                if let Err(hook_err) = observer.on_experiment_end() {
                    warn!(
                        error = %hook_err,
                        "observer failed while closing an aborted experiment"
                    );
                }
            }
            return Err(err);
        }

        for observer in &mut self.observers {
            observer.on_experiment_end()?;
        }
        info!(games = n, total = self.results.len(), "experiment finished");
        Ok(self.results[start..].to_vec())
    }

    fn play_batch(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            let record = self.single_game()?;
            self.results.push(record);
            let game_num = self.results.len();
            for observer in &mut self.observers {
                observer.on_game_end(game_num, &record)?;
            }
        }
        Ok(())
    }

    /// Play one game with fresh actors. The result is not recorded.
    pub fn single_game(&mut self) -> Result<GameRecord> {
        let mut order = self.config.kinds.clone();
        if self.config.randomize_order {
            self.die.shuffle(&mut order);
        }
        if let (Some(seed), SeedPolicy::PerGame) = (self.config.seed, self.config.seed_policy) {
            self.die.reseed(seed);
        }

        let actors = order
            .into_iter()
            .map(|kind| Actor::new(kind, &self.config.params))
            .collect();
        let mut game = Game::new(&self.board, actors)?.with_move_limit(self.config.max_moves);
        game.play(&mut self.die)
    }

    /// Every recorded game, in the order played.
    pub fn results(&self) -> &[GameRecord] {
        &self.results
    }

    /// Games won by each kind; every kind is present.
    pub fn winners_per_kind(&self) -> BTreeMap<ActorKind, usize> {
        let mut wins = empty_per_kind::<usize>();
        for record in &self.results {
            *wins.entry(record.winner).or_default() += 1;
        }
        wins
    }

    /// Move counts of the games each kind won, in game order.
    pub fn durations_per_kind(&self) -> BTreeMap<ActorKind, Vec<usize>> {
        let mut durations = empty_per_kind::<Vec<usize>>();
        for record in &self.results {
            durations.entry(record.winner).or_default().push(record.moves);
        }
        durations
    }

    /// Seats configured for each kind, regardless of outcomes.
    pub fn participants_per_kind(&self) -> BTreeMap<ActorKind, usize> {
        let mut participants = empty_per_kind::<usize>();
        for &kind in &self.config.kinds {
            *participants.entry(kind).or_default() += 1;
        }
        participants
    }

    pub fn report(&self) -> ExperimentReport {
        ExperimentReport::new(
            &self.results,
            &self.participants_per_kind(),
            &self.winners_per_kind(),
            &self.durations_per_kind(),
        )
    }
}

fn empty_per_kind<T: Default>() -> BTreeMap<ActorKind, T> {
    ActorKind::ALL
        .into_iter()
        .map(|kind| (kind, T::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn seeded(kinds: Vec<ActorKind>, seed: u64) -> Experiment {
        Experiment::new(
            Board::default(),
            ExperimentConfig::new(kinds).with_seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_field() {
        let err = Experiment::new(Board::default(), ExperimentConfig::new(Vec::new()))
            .err()
            .unwrap();
        assert!(matches!(err, Error::NoActors));
        assert!(err.is_config_error());
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = ExperimentConfig::from_tags(&["standard", "wizard"]).unwrap_err();
        assert!(matches!(err, Error::UnknownActorKind { ref input, .. } if input == "wizard"));
    }

    #[test]
    fn seed_policy_parses() {
        assert_eq!("per-game".parse::<SeedPolicy>().unwrap(), SeedPolicy::PerGame);
        assert_eq!(
            "Per-Experiment".parse::<SeedPolicy>().unwrap(),
            SeedPolicy::PerExperiment
        );
        assert!("sometimes".parse::<SeedPolicy>().is_err());
    }

    #[test]
    fn per_game_seed_replays_identical_games() {
        let mut experiment = seeded(vec![ActorKind::Standard, ActorKind::Resilient], 5);
        let results = experiment.run(5).unwrap();
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn per_experiment_seed_is_reproducible() {
        let config = ExperimentConfig::new(vec![ActorKind::Standard; 3])
            .with_seed(89)
            .with_seed_policy(SeedPolicy::PerExperiment);
        let mut first = Experiment::new(Board::default(), config.clone()).unwrap();
        let mut second = Experiment::new(Board::default(), config).unwrap();
        assert_eq!(first.run(20).unwrap(), second.run(20).unwrap());
    }

    #[test]
    fn every_kind_appears_in_views() {
        let mut experiment = seeded(vec![ActorKind::Lazy], 1);
        experiment.run(3).unwrap();
        let wins = experiment.winners_per_kind();
        assert_eq!(wins.len(), 3);
        assert_eq!(wins[&ActorKind::Lazy], 3);
        assert_eq!(wins[&ActorKind::Standard], 0);
        assert!(experiment.durations_per_kind()[&ActorKind::Resilient].is_empty());
    }

    #[test]
    fn rejects_out_of_range_params() {
        for params in [
            ActorParams::default().with_extra_steps(i32::MAX),
            ActorParams::default().with_dropped_steps(-1),
        ] {
            let config = ExperimentConfig::new(vec![ActorKind::Resilient, ActorKind::Lazy])
                .with_params(params);
            let err = Experiment::new(Board::default(), config).err().unwrap();
            assert!(matches!(err, Error::InvalidConfiguration { .. }));
            assert!(err.is_config_error());
        }
    }

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Observer for Recorder {
        fn on_experiment_start(&mut self, total: usize) -> Result<()> {
            self.0.lock().unwrap().push(format!("start {total}"));
            Ok(())
        }

        fn on_game_end(&mut self, game_num: usize, _record: &GameRecord) -> Result<()> {
            self.0.lock().unwrap().push(format!("game {game_num}"));
            Ok(())
        }

        fn on_experiment_end(&mut self) -> Result<()> {
            self.0.lock().unwrap().push("end".to_string());
            Ok(())
        }
    }

    #[test]
    fn aborted_run_keeps_finished_games_and_closes_observers() {
        // with seed 42 the first three games last 49, 64 and 76 moves
        let config = ExperimentConfig::new(vec![
            ActorKind::Standard,
            ActorKind::Resilient,
            ActorKind::Lazy,
        ])
        .with_seed(42)
        .with_seed_policy(SeedPolicy::PerExperiment)
        .with_move_limit(70);
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut experiment = Experiment::new(Board::default(), config)
            .unwrap()
            .with_observer(Box::new(Recorder(Arc::clone(&events))));

        let err = experiment.run(5).unwrap_err();
        assert!(matches!(err, Error::MoveLimitExceeded { limit: 70 }));
        assert!(err.is_divergence());
        assert_eq!(experiment.results().len(), 2);
        assert_eq!(
            *events.lock().unwrap(),
            vec!["start 5", "game 1", "game 2", "end"]
        );
    }

    #[test]
    fn results_accumulate_across_runs() {
        let mut experiment = seeded(vec![ActorKind::Standard, ActorKind::Lazy], 9);
        assert_eq!(experiment.run(4).unwrap().len(), 4);
        assert_eq!(experiment.run(6).unwrap().len(), 6);
        assert_eq!(experiment.results().len(), 10);
        assert_eq!(experiment.winners_per_kind().values().sum::<usize>(), 10);
    }
}
