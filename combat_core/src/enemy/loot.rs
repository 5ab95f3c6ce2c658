use gear_core::OrganParts;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Loot amount: a fixed value or an inclusive `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Fixed(u32),
    Range([u32; 2]),
}

impl Amount {
    pub fn min(&self) -> u32 {
        match self {
            Amount::Fixed(v) => *v,
            Amount::Range([a, b]) => (*a).min(*b),
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            Amount::Fixed(v) => *v,
            Amount::Range([a, b]) => (*a).max(*b),
        }
    }

    /// Draw a value. Fixed amounts (and degenerate ranges) consume no randomness.
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        let (min, max) = (self.min(), self.max());
        if min == max {
            min
        } else {
            rng.gen_range(min..=max)
        }
    }
}

/// Organ-part drop of an archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    pub hearts: Amount,
    pub brains: Amount,
}

impl LootTable {
    pub fn new(hearts: Amount, brains: Amount) -> Self {
        LootTable { hearts, brains }
    }

    /// Independent draw per call
    pub fn roll(&self, rng: &mut impl Rng) -> OrganParts {
        let hearts = self.hearts.roll(rng);
        let brains = self.brains.roll(rng);
        OrganParts::new(hearts, brains)
    }
}
