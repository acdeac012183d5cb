use bracket_random::prelude::RandomNumberGenerator;

/// Source of randomness for map generation, loot rolls and enemy fallback steps.
///
/// Everything random in the engine goes through this trait so a fixed seed
/// reproduces a run exactly.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[min, max)`. An empty range yields `min`.
    fn range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform integer in `[min, max]`.
    fn roll_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.range(min, max + 1)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.range(0, len as i32) as usize
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for idx in (1..items.len()).rev() {
        let swap_with = rng.range(0, idx as i32 + 1) as usize;
        items.swap(idx, swap_with);
    }
}

/// Default source backed by bracket's xorshift generator.
pub struct BracketDice {
    rng: RandomNumberGenerator,
}

impl BracketDice {
    pub fn new() -> Self {
        Self {
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RandomNumberGenerator::seeded(seed),
        }
    }
}

impl Default for BracketDice {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for BracketDice {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.range(min, max)
    }
}
