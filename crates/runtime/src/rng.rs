//! RNG-backed dice.

use battle_core::DiceRoller;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Dice roller over a seedable standard RNG.
#[derive(Clone, Debug)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl DiceRoller for RandomRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides)
    }
}
