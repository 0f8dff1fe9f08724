//! Seeded randomness for the duel.

use bevy::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Seeded random number generator for deterministic duel simulation.
///
/// When a seed is provided (e.g., via headless config), the same seed and the
/// same input sequence always produce the same duel. Without a seed, uses
/// system entropy.
///
/// The generator state (key, stream and word position) serializes with it,
/// so a snapshot taken mid-duel resumes the exact same random sequence.
#[derive(Resource, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRng {
    rng: ChaCha12Rng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha12Rng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random f32 in the given range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Returns true with the given probability.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.random_f32() < probability
    }

    /// Fair coin: true on the upper half of the unit interval.
    pub fn coin_flip(&mut self) -> bool {
        self.random_f32() > 0.5
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRng").field("seed", &self.seed).finish()
    }
}
