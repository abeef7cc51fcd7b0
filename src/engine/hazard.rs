//! Randomized hazard ("haunting") resolution: a per-turn independent
//! Bernoulli trial with probability `1 / denominator`.

use rand::Rng;

/// The draw value that fires the hazard.
const HAZARD_TRIGGER: u32 = 1;

/// Per-turn hazard draw. The denominator comes from configuration; a value
/// of 1 fires every turn, which the tests lean on for determinism.
#[derive(Debug, Clone, Copy)]
pub struct HazardDice {
    denominator: u32,
}

impl HazardDice {
    pub fn new(denominator: u32) -> Self {
        // A zero denominator would make the draw range empty.
        Self {
            denominator: denominator.max(1),
        }
    }

    /// Draw once. Independent across turns; nothing accumulates.
    pub fn fires<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen_range(1..=self.denominator) == HAZARD_TRIGGER
    }
}
