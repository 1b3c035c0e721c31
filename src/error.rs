//! Error types for the chutes crate

use thiserror::Error;

use crate::actor::ActorKind;

/// Main error type for the chutes crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("transition at square {square} maps onto itself")]
    SelfTransition { square: i32 },

    #[error("square {square} is the start of more than one transition")]
    DuplicateTransition { square: i32 },

    #[error("transition {start} -> {end} uses a negative square")]
    NegativeSquare { start: i32, end: i32 },

    #[error("goal {goal} must be a positive square")]
    InvalidGoal { goal: i32 },

    #[error("unknown actor kind '{input}'. Expected one of: {expected}")]
    UnknownActorKind { input: String, expected: String },

    #[error("an experiment needs at least one actor")]
    NoActors,

    #[error("invalid seed policy '{input}'. Expected one of: {expected}")]
    ParseSeedPolicy { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("{kind} actor exceeded {limit} chained transitions in a single move")]
    SimulationDivergence { kind: ActorKind, limit: usize },

    #[error("game did not finish within {limit} moves")]
    MoveLimitExceeded { limit: usize },

    #[error("game already finished")]
    GameFinished,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// True for errors raised while validating boards or experiment setup,
    /// before any game is played.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::SelfTransition { .. }
                | Error::DuplicateTransition { .. }
                | Error::NegativeSquare { .. }
                | Error::InvalidGoal { .. }
                | Error::UnknownActorKind { .. }
                | Error::NoActors
                | Error::ParseSeedPolicy { .. }
                | Error::InvalidConfiguration { .. }
        )
    }

    /// True when a game was abandoned because it did not converge, either
    /// inside one move or over the whole game.
    pub fn is_divergence(&self) -> bool {
        matches!(
            self,
            Error::SimulationDivergence { .. } | Error::MoveLimitExceeded { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
