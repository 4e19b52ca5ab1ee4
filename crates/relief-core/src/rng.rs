//! Seedable random source threaded through every generator and erosion model.
//!
//! A single `RandomSource` owns all randomness for a generation pass; there
//! is no ambient or global RNG anywhere in the crate. One seed, one draw
//! order, one terrain.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform draw from `[lo, hi)`. Returns `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `[lo, hi)`.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Fisher–Yates shuffle; used to randomize neighbour visit order.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }

    /// Derive a 32-bit seed for an auxiliary noise function.
    pub fn derive_seed(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
