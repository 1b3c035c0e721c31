//! Board layout: chutes, ladders and the goal square
//!
//! A board is immutable once built. Every transition is applied at most once
//! per lookup; chains of transitions are never resolved iteratively here.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Square index on the board. Signed so position deltas share the type.
pub type Square = i32;

/// Goal of the classic layout.
pub const DEFAULT_GOAL: Square = 90;

/// Descending transitions of the classic layout, as `(start, end)`.
pub const DEFAULT_CHUTES: [(Square, Square); 7] = [
    (24, 5),
    (33, 3),
    (42, 30),
    (56, 37),
    (64, 27),
    (74, 12),
    (87, 70),
];

/// Ascending transitions of the classic layout, as `(start, end)`.
pub const DEFAULT_LADDERS: [(Square, Square); 7] = [
    (1, 40),
    (8, 10),
    (36, 52),
    (43, 62),
    (49, 79),
    (65, 82),
    (68, 85),
];

/// A single jump from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub start: Square,
    pub end: Square,
}

impl Transition {
    pub fn new(start: Square, end: Square) -> Self {
        Self { start, end }
    }

    /// Signed distance travelled when the transition fires.
    pub fn delta(&self) -> Square {
        self.end - self.start
    }

    pub fn is_chute(&self) -> bool {
        self.end < self.start
    }

    pub fn is_ladder(&self) -> bool {
        self.end > self.start
    }
}

impl From<(Square, Square)> for Transition {
    fn from((start, end): (Square, Square)) -> Self {
        Self::new(start, end)
    }
}

/// Serializable board description, e.g. loaded from a JSON file.
///
/// Missing fields fall back to the classic layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub chutes: Vec<(Square, Square)>,
    pub ladders: Vec<(Square, Square)>,
    pub goal: Square,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            chutes: DEFAULT_CHUTES.to_vec(),
            ladders: DEFAULT_LADDERS.to_vec(),
            goal: DEFAULT_GOAL,
        }
    }
}

/// Chutes and ladders board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    transitions: BTreeMap<Square, Square>,
    goal: Square,
}

impl Board {
    /// Build a board from optional chute and ladder lists and an optional goal.
    ///
    /// `None` selects the classic value for that part of the layout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a transition maps a square onto itself,
    /// two transitions share a start square, a square is negative, or the goal
    /// is not positive.
    pub fn new(
        chutes: Option<&[(Square, Square)]>,
        ladders: Option<&[(Square, Square)]>,
        goal: Option<Square>,
    ) -> Result<Self> {
        let chutes = chutes.unwrap_or(&DEFAULT_CHUTES);
        let ladders = ladders.unwrap_or(&DEFAULT_LADDERS);
        Self::with_transitions(
            chutes.iter().chain(ladders).copied().map(Transition::from),
            goal.unwrap_or(DEFAULT_GOAL),
        )
    }

    /// Build a board from an arbitrary set of transitions.
    ///
    /// # Errors
    ///
    /// Same validation as [`Board::new`].
    pub fn with_transitions<I>(transitions: I, goal: Square) -> Result<Self>
    where
        I: IntoIterator<Item = Transition>,
    {
        if goal <= 0 {
            return Err(Error::InvalidGoal { goal });
        }

        let mut table = BTreeMap::new();
        for Transition { start, end } in transitions {
            if start < 0 || end < 0 {
                return Err(Error::NegativeSquare { start, end });
            }
            if start == end {
                return Err(Error::SelfTransition { square: start });
            }
            if table.insert(start, end).is_some() {
                return Err(Error::DuplicateTransition { square: start });
            }
        }

        Ok(Self {
            transitions: table,
            goal,
        })
    }

    /// Build a board from a deserialized description.
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        Self::new(
            Some(&config.chutes),
            Some(&config.ladders),
            Some(config.goal),
        )
    }

    /// Load and validate a JSON board description.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read board file {}", path.display()),
            source,
        })?;
        let config: BoardConfig = serde_json::from_str(&contents)?;
        Self::from_config(&config)
    }

    /// Distance the transition starting at `position` moves a player, or 0.
    pub fn adjust(&self, position: Square) -> Square {
        self.transitions
            .get(&position)
            .map_or(0, |end| end - position)
    }

    /// Whether `position` ends the game.
    pub fn reached(&self, position: Square) -> bool {
        position >= self.goal
    }

    pub fn goal(&self) -> Square {
        self.goal
    }

    /// Transitions ordered by start square.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions
            .iter()
            .map(|(&start, &end)| Transition::new(start, end))
    }

    pub fn chutes(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions().filter(Transition::is_chute)
    }

    pub fn ladders(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions().filter(Transition::is_ladder)
    }

    /// Back to a serializable description.
    pub fn to_config(&self) -> BoardConfig {
        BoardConfig {
            chutes: self.chutes().map(|t| (t.start, t.end)).collect(),
            ladders: self.ladders().map(|t| (t.start, t.end)).collect(),
            goal: self.goal,
        }
    }
}

impl Default for Board {
    /// The classic 90-square layout.
    fn default() -> Self {
        let transitions = DEFAULT_CHUTES
            .iter()
            .chain(&DEFAULT_LADDERS)
            .copied()
            .collect();
        Self {
            transitions,
            goal: DEFAULT_GOAL,
        }
    }
}
