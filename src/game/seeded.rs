//! Deterministic pseudo-random sequence for obstacle placement
//!
//! Obstacle layouts are derived from the board style alone, so every board of
//! a given style gets the same scatter pattern wherever its cells are free.
//! The sequence is a pure function of an integer seed, independent of any
//! host random source.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Map an integer seed to a float in `[0, 1)`
pub fn pseudo_random(seed: u64) -> f64 {
    let value = (seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)) % MODULUS;
    value as f64 / MODULUS as f64
}

/// A seed base with offset lookups into [`pseudo_random`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededSequence {
    base: u64,
}

impl SeededSequence {
    pub fn new(base: u64) -> Self {
        Self { base }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn at(&self, offset: u64) -> f64 {
        pseudo_random(self.base + offset)
    }
}
