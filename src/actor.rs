//! Players and their movement strategies
//!
//! Every actor rolls the die once per turn and adds the roll to its position.
//! What happens afterwards depends on its [`ActorKind`]:
//!
//! - `Standard` follows at most one chute or ladder.
//! - `Resilient` climbs back out of chutes: after sliding down it walks
//!   `extra_steps` squares and rolls again, for as long as it keeps landing on
//!   chutes, then takes a ladder if it ends on one.
//! - `Lazy` loses ground after ladders: after climbing it rolls again and, if
//!   the roll beats `dropped_steps`, moves `roll - dropped_steps` squares
//!   (otherwise stays put), for as long as it keeps landing on ladders, then
//!   takes a chute if it ends on one.
//!
//! The Resilient and Lazy loops only terminate on boards without a reachable
//! cycle of chutes (respectively ladders). `ActorParams::chain_limit` turns
//! such a cycle into [`Error::SimulationDivergence`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Error, Result,
    board::{Board, Square},
    die::Die,
};

/// Closed set of player behaviours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorKind {
    Standard,
    Resilient,
    Lazy,
}

impl ActorKind {
    pub const ALL: [ActorKind; 3] = [ActorKind::Standard, ActorKind::Resilient, ActorKind::Lazy];

    /// Creates the boxed movement strategy for this kind.
    pub fn into_boxed_movement(self, params: &ActorParams) -> Box<dyn Movement> {
        match self {
            ActorKind::Standard => Box::new(StandardMovement),
            ActorKind::Resilient => Box::new(ResilientMovement {
                extra_steps: params.extra_steps,
                chain_limit: params.chain_limit,
            }),
            ActorKind::Lazy => Box::new(LazyMovement {
                dropped_steps: params.dropped_steps,
                chain_limit: params.chain_limit,
            }),
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActorKind::Standard => "standard",
            ActorKind::Resilient => "resilient",
            ActorKind::Lazy => "lazy",
        };
        f.write_str(label)
    }
}

impl FromStr for ActorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "player" => Ok(ActorKind::Standard),
            "resilient" | "resilientplayer" | "resilient-player" => Ok(ActorKind::Resilient),
            "lazy" | "lazyplayer" | "lazy-player" => Ok(ActorKind::Lazy),
            _ => Err(Error::UnknownActorKind {
                input: s.to_string(),
                expected: "standard, resilient, lazy".to_string(),
            }),
        }
    }
}

/// Tunables shared by every actor of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorParams {
    /// Squares a Resilient actor walks after sliding down a chute.
    pub extra_steps: Square,
    /// Squares a Lazy actor gives back after climbing a ladder.
    pub dropped_steps: Square,
    /// Maximum chained re-rolls within one move.
    pub chain_limit: usize,
}

impl ActorParams {
    pub const DEFAULT_CHAIN_LIMIT: usize = 10_000;
    /// Largest accepted `extra_steps` or `dropped_steps`.
    pub const MAX_STEPS: Square = 1_000;

    /// Check that the step counts lie in `0..=MAX_STEPS` and that chains are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, steps) in [
            ("extra_steps", self.extra_steps),
            ("dropped_steps", self.dropped_steps),
        ] {
            if !(0..=Self::MAX_STEPS).contains(&steps) {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "{name} must be between 0 and {}, got {steps}",
                        Self::MAX_STEPS
                    ),
                });
            }
        }
        if self.chain_limit == 0 {
            return Err(Error::InvalidConfiguration {
                message: "chain_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_extra_steps(mut self, steps: Square) -> Self {
        self.extra_steps = steps;
        self
    }

    pub fn with_dropped_steps(mut self, steps: Square) -> Self {
        self.dropped_steps = steps;
        self
    }

    pub fn with_chain_limit(mut self, limit: usize) -> Self {
        self.chain_limit = limit;
        self
    }
}

impl Default for ActorParams {
    fn default() -> Self {
        Self {
            extra_steps: 1,
            dropped_steps: 1,
            chain_limit: Self::DEFAULT_CHAIN_LIMIT,
        }
    }
}

/// Movement rule of one actor kind
pub trait Movement: Send + Sync + fmt::Debug {
    fn kind(&self) -> ActorKind;

    /// Position after one turn starting from `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SimulationDivergence`] if the rule chains more
    /// transitions than its limit allows.
    fn advance(&self, position: Square, board: &Board, die: &mut dyn Die) -> Result<Square>;
}

/// One roll, at most one transition
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMovement;

impl Movement for StandardMovement {
    fn kind(&self) -> ActorKind {
        ActorKind::Standard
    }

    fn advance(&self, position: Square, board: &Board, die: &mut dyn Die) -> Result<Square> {
        let landed = position + die.roll();
        Ok(landed + board.adjust(landed))
    }
}

/// Recovers from chutes
#[derive(Debug, Clone, Copy)]
pub struct ResilientMovement {
    pub extra_steps: Square,
    pub chain_limit: usize,
}

impl Movement for ResilientMovement {
    fn kind(&self) -> ActorKind {
        ActorKind::Resilient
    }

    fn advance(&self, position: Square, board: &Board, die: &mut dyn Die) -> Result<Square> {
        let mut position = position + die.roll();
        let mut chained = 0;

        while board.adjust(position) < 0 {
            chained += 1;
            if chained > self.chain_limit {
                warn!(
                    position,
                    limit = self.chain_limit,
                    "resilient actor keeps hitting chutes"
                );
                return Err(Error::SimulationDivergence {
                    kind: self.kind(),
                    limit: self.chain_limit,
                });
            }
            position += board.adjust(position);
            position = position
                .saturating_add(self.extra_steps)
                .saturating_add(die.roll());
        }

        let delta = board.adjust(position);
        if delta > 0 {
            position += delta;
        }
        Ok(position)
    }
}

/// Gives back ground after ladders
#[derive(Debug, Clone, Copy)]
pub struct LazyMovement {
    pub dropped_steps: Square,
    pub chain_limit: usize,
}

impl Movement for LazyMovement {
    fn kind(&self) -> ActorKind {
        ActorKind::Lazy
    }

    fn advance(&self, position: Square, board: &Board, die: &mut dyn Die) -> Result<Square> {
        let mut position = position + die.roll();
        let mut chained = 0;

        while board.adjust(position) > 0 {
            chained += 1;
            if chained > self.chain_limit {
                warn!(
                    position,
                    limit = self.chain_limit,
                    "lazy actor keeps hitting ladders"
                );
                return Err(Error::SimulationDivergence {
                    kind: self.kind(),
                    limit: self.chain_limit,
                });
            }
            position += board.adjust(position);
            let roll = die.roll();
            if roll > self.dropped_steps {
                position = position.saturating_add(roll.saturating_sub(self.dropped_steps));
            }
        }

        let delta = board.adjust(position);
        if delta < 0 {
            position += delta;
        }
        Ok(position)
    }
}

/// A player on the board
#[derive(Debug)]
pub struct Actor {
    movement: Box<dyn Movement>,
    position: Square,
}

impl Actor {
    /// New actor at square 0.
    pub fn new(kind: ActorKind, params: &ActorParams) -> Self {
        Self::with_movement(kind.into_boxed_movement(params))
    }

    pub fn with_movement(movement: Box<dyn Movement>) -> Self {
        Self {
            movement,
            position: 0,
        }
    }

    pub fn kind(&self) -> ActorKind {
        self.movement.kind()
    }

    pub fn position(&self) -> Square {
        self.position
    }

    /// Take one turn and return the new position.
    pub fn take_turn(&mut self, board: &Board, die: &mut dyn Die) -> Result<Square> {
        self.position = self.movement.advance(self.position, board, die)?;
        Ok(self.position)
    }
}
