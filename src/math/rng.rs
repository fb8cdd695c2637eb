use rand::{rngs::StdRng, Rng, SeedableRng};

use super::TAU;

/// Uniform random source for everything the game randomizes.
pub struct GameRng {
    inner: StdRng,
}

impl GameRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform in `[lo, hi)`. Collapses to `lo` on an empty range
    /// (e.g. a zero-width canvas) instead of panicking.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if !(hi > lo) {
            return lo;
        }
        self.inner.gen_range(lo..hi)
    }

    /// Uniform in `[0, bound)`.
    pub fn below(&mut self, bound: f32) -> f32 {
        self.range(0.0, bound)
    }

    pub fn angle(&mut self) -> f32 {
        self.range(0.0, TAU)
    }

    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }
}
