use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// `rolls` dice with `sides` faces each, written `NdM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    rolls: u32,
    sides: u32,
}

impl Die {
    /// Returns `None` for a zero-sided die.
    #[must_use]
    pub fn new(rolls: u32, sides: u32) -> Option<Self> {
        (sides > 0).then_some(Self { rolls, sides })
    }

    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Smallest possible total.
    pub fn min(&self) -> u32 {
        self.rolls
    }

    /// Largest possible total.
    pub fn max(&self) -> u32 {
        self.rolls.saturating_mul(self.sides)
    }

    /// Sum of `rolls` independent uniform draws in `1..=sides`.
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        (0..self.rolls).fold(0u32, |total, _| {
            total.saturating_add(rng.gen_range(1..=self.sides))
        })
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.rolls, self.sides)
    }
}
