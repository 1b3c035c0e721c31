//! Shared helpers for the integration tests.

use std::collections::VecDeque;

use chutes::{Die, Square};

/// Die that replays a fixed sequence of rolls.
///
/// Panics when the sequence runs out, so a test that consumes more rolls than
/// it scripted fails loudly.
pub struct ScriptedDie {
    rolls: VecDeque<Square>,
}

impl ScriptedDie {
    pub fn new(rolls: &[Square]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Die for ScriptedDie {
    fn roll(&mut self) -> Square {
        self.rolls
            .pop_front()
            .expect("scripted die ran out of rolls")
    }
}
