//! Accumulator threaded through one evaluation pass

use crate::ItemTag;
use indexmap::IndexMap;
use std::time::Duration;

/// Running success chance, duration and output multipliers
///
/// Seeded from a definition's base values and handed by value from one
/// modifier to the next. It lives only for the duration of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    success_chance: f64,
    duration: Duration,
    output_multipliers: IndexMap<ItemTag, f64>,
}

impl Computation {
    /// Seed from base values
    pub fn seed(success_chance: f64, duration: Duration) -> Self {
        Self {
            success_chance: clamp_unit(success_chance),
            duration,
            output_multipliers: IndexMap::new(),
        }
    }

    pub fn success_chance(&self) -> f64 {
        self.success_chance
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn output_multipliers(&self) -> &IndexMap<ItemTag, f64> {
        &self.output_multipliers
    }

    /// Multiplier recorded for an item, 1.0 when none was recorded
    pub fn output_multiplier(&self, item: &ItemTag) -> f64 {
        self.output_multipliers.get(item).copied().unwrap_or(1.0)
    }

    /// Add to the success chance, clamping the result to [0, 1]
    pub fn add_success_chance(mut self, delta: f64) -> Self {
        self.success_chance = clamp_unit(self.success_chance + delta);
        self
    }

    /// Multiply the success chance, clamping the result to [0, 1]
    pub fn scale_success_chance(mut self, factor: f64) -> Self {
        self.success_chance = clamp_unit(self.success_chance * factor);
        self
    }

    /// Multiply the duration
    pub fn scale_duration(mut self, factor: f64) -> Self {
        self.duration = scale(self.duration, factor);
        self
    }

    /// Compound an output multiplier with whatever is already recorded for the item
    pub fn compound_output(mut self, item: &ItemTag, factor: f64) -> Self {
        let slot = self.output_multipliers.entry(item.clone()).or_insert(1.0);
        *slot *= factor;
        self
    }

    pub(crate) fn into_parts(self) -> (f64, Duration, IndexMap<ItemTag, f64>) {
        (self.success_chance, self.duration, self.output_multipliers)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn scale(duration: Duration, factor: f64) -> Duration {
    if factor == 1.0 {
        return duration;
    }
    // Also catches NaN.
    if !(factor > 0.0) {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(duration.as_secs_f64() * factor).unwrap_or(Duration::MAX)
}
