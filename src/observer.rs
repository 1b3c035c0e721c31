//! Observer port for experiments, plus the built-in adapters
//!
//! Hooks are called in this order:
//! 1. `on_experiment_start(total_games)` once per `Experiment::run` call
//! 2. `on_game_end(game_num, record)` after every game
//! 3. `on_experiment_end()` once the batch is done
//!
//! `game_num` counts from 1 across every batch the experiment has run.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Result, game::GameRecord};

/// Observer trait for monitoring experiments
pub trait Observer: Send {
    fn on_experiment_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar with a running tally of the latest winner
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    played: u64,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for ProgressObserver {
    fn on_experiment_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        self.played = 0;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        self.played += 1;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.played);
            pb.set_message(format!("last: {} in {}", record.winner, record.moves));
        }
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message("done");
        }
        Ok(())
    }
}

/// Streams one JSON object per finished game
pub struct JsonlObserver<W: Write + Send> {
    writer: W,
}

#[derive(serde::Serialize)]
struct GameLine<'a> {
    game: usize,
    #[serde(flatten)]
    record: &'a GameRecord,
}

impl JsonlObserver<BufWriter<File>> {
    /// Create (or truncate) `path` and write records to it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create trace file {}", path.display()),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonlObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for JsonlObserver<W> {
    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        let line = GameLine {
            game: game_num,
            record,
        };
        let mut bytes = serde_json::to_vec(&line)?;
        bytes.push(b'\n');
        self.writer.write_all(&bytes).map_err(|source| Error::Io {
            operation: "write trace file".to_string(),
            source,
        })
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Io {
            operation: "flush trace file".to_string(),
            source,
        })
    }
}
