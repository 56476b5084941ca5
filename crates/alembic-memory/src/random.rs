//! Scripted randomness

use alembic_core::RandomSource;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Random source that replays a fixed list of rolls
///
/// Once the list runs out the last roll repeats. An empty list always
/// yields `0.0`.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    state: Mutex<Script>,
}

#[derive(Debug, Default)]
struct Script {
    pending: VecDeque<f64>,
    last: f64,
    drawn: usize,
}

impl ScriptedRandom {
    /// Rolls are clamped into `[0, 1)`
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        let pending = rolls.into_iter().map(clamp_roll).collect();
        Self {
            state: Mutex::new(Script {
                pending,
                last: 0.0,
                drawn: 0,
            }),
        }
    }

    /// Always roll the same value
    pub fn constant(roll: f64) -> Self {
        Self::new([roll])
    }

    /// Number of rolls drawn so far
    pub fn drawn(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).drawn
    }
}

fn clamp_roll(roll: f64) -> f64 {
    if roll.is_nan() {
        0.0
    } else {
        roll.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        let mut script = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        script.drawn += 1;
        if let Some(roll) = script.pending.pop_front() {
            script.last = roll;
        }
        script.last
    }
}
