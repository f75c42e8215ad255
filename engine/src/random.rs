//! Random Field
//!
//! Seedable source of scalar randomness shared by the terrain and structure
//! generators. Every draw goes through one ChaCha stream, so two fields built
//! from the same seed produce identical scenes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One of the three lattice axes, picked by [`RandomField::axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Deterministic random source for procedural generation.
#[derive(Debug, Clone)]
pub struct RandomField {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomField {
    /// Create a field that replays the same draws for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a field from a fresh OS-derived seed.
    ///
    /// The chosen seed is kept so a scene can be regenerated later.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// Seed this field was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform draw in `[0, span)`, the jitter term of a ring sample.
    pub fn jitter(&mut self, span: f32) -> f32 {
        span * self.unit()
    }

    /// Uniform byte, used for color channels.
    pub fn byte(&mut self) -> u8 {
        self.rng.random::<u8>()
    }

    /// Uniform integer code in `0..=max`.
    pub fn code(&mut self, max: i32) -> i32 {
        self.rng.random_range(0..=max)
    }

    /// Three-way split between the lattice axes, each with probability 1/3.
    pub fn axis(&mut self) -> Axis {
        let roll = self.unit();
        if roll < 1.0 / 3.0 {
            Axis::X
        } else if roll < 2.0 / 3.0 {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}
