//! Six-sided die and the random source behind it

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::board::Square;

/// Lowest face of the die.
pub const MIN_ROLL: Square = 1;
/// Highest face of the die.
pub const MAX_ROLL: Square = 6;

/// Source of die rolls.
///
/// Implementations must return values in `MIN_ROLL..=MAX_ROLL`.
pub trait Die {
    fn roll(&mut self) -> Square;
}

/// Fair die backed by a seedable generator
#[derive(Debug, Clone)]
pub struct RandomDie {
    rng: StdRng,
}

impl RandomDie {
    /// Seeded die, or one seeded from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }

    /// Restart the roll sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Shuffle `items` with the same generator that produces the rolls.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Die for RandomDie {
    fn roll(&mut self) -> Square {
        self.rng.random_range(MIN_ROLL..=MAX_ROLL)
    }
}
