use std::collections::VecDeque;

use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Create a deterministic StdRng from a u64 seed.
/// This is the ONLY way to create an RNG for the game.
/// All randomness flows through a `Dice` borrowed from the app root.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform integer source used by combat, encounters and level-ups.
pub trait Dice {
    /// Uniform value in `[0, bound)`. Returns 0 when `bound <= 0`.
    fn below(&mut self, bound: i64) -> i64;
}

impl Dice for StdRng {
    fn below(&mut self, bound: i64) -> i64 {
        if bound <= 0 {
            0
        } else {
            self.random_range(0..bound)
        }
    }
}

/// Replays a fixed sequence of rolls. Each value is clamped into
/// `[0, bound)`; once exhausted every roll is 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i64>,
    /// Bounds requested so far, in call order.
    pub requested: Vec<i64>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            requested: Vec::new(),
        }
    }

    /// Dice that always rolls 0.
    pub fn zeros() -> Self {
        Self::default()
    }
}

impl Dice for ScriptedDice {
    fn below(&mut self, bound: i64) -> i64 {
        self.requested.push(bound);
        let next = self.rolls.pop_front().unwrap_or(0);
        if bound <= 0 {
            0
        } else {
            next.clamp(0, bound - 1)
        }
    }
}
