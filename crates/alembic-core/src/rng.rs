//! Deterministic random number generation
//!
//! Uses a simple xorshift64 algorithm so the same seed produces the same
//! sequence of rolls on every platform.

use crate::RandomSource;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A deterministic random number generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift requires a non-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Get the current state (useful for saving/loading)
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random f64 in range [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits, so the result is exactly representable and below 1.0.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// [`RandomSource`] backed by a seeded [`GameRng`]
///
/// Shared between concurrent executions, so draws are serialized by a lock.
#[derive(Debug, Default)]
pub struct SeededRandom {
    rng: Mutex<GameRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed))
    }

    /// Resume from a saved generator
    pub fn from_rng(rng: GameRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Current generator state, for saving
    pub fn snapshot(&self) -> GameRng {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GameRng> {
        // A panic while holding the lock cannot leave the state half-written.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.lock().next_f64()
    }
}
