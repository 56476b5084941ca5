//! Modifiers: conditional adjustments to success chance, duration and outputs
//!
//! Modifiers are folded over a [`Computation`] in the order the definition
//! lists them. Each one receives the accumulator as left by the previous
//! modifier and returns the updated value, so an additive bonus placed before
//! a multiplicative one composes differently from the reverse order.

use crate::{
    ActorSnapshot, Computation, Error, ItemTag, KnowledgeKey, ReactionContext, Result, ToolTag,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rule that adjusts the running computation when its condition holds
pub trait Modifier: fmt::Debug + Send + Sync {
    /// Return the computation after this modifier's adjustment
    ///
    /// A modifier whose condition does not hold returns the input unchanged.
    fn apply(
        &self,
        context: &ReactionContext,
        actor: &ActorSnapshot,
        computation: Computation,
    ) -> Computation;
}

/// Adjustments a built-in modifier makes when active
///
/// Within one modifier they apply in field order: delta, multiplier,
/// duration, outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierEffects {
    #[serde(default)]
    pub success_chance_delta: Option<f64>,
    #[serde(default)]
    pub success_chance_multiplier: Option<f64>,
    #[serde(default)]
    pub duration_multiplier: Option<f64>,
    #[serde(default)]
    pub output_multipliers: IndexMap<ItemTag, f64>,
}

impl ModifierEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_chance_delta(mut self, delta: f64) -> Self {
        self.success_chance_delta = Some(delta);
        self
    }

    pub fn success_chance_multiplier(mut self, factor: f64) -> Self {
        self.success_chance_multiplier = Some(factor);
        self
    }

    pub fn duration_multiplier(mut self, factor: f64) -> Self {
        self.duration_multiplier = Some(factor);
        self
    }

    pub fn output_multiplier(mut self, item: ItemTag, factor: f64) -> Self {
        self.output_multipliers.insert(item, factor);
        self
    }

    /// Reject non-finite values and negative multipliers
    pub fn validate(&self) -> Result<()> {
        if let Some(delta) = self.success_chance_delta {
            if !delta.is_finite() {
                return Err(Error::InvalidModifier(format!(
                    "success chance delta must be finite, got {delta}"
                )));
            }
        }
        check_factor("success chance multiplier", self.success_chance_multiplier)?;
        check_factor("duration multiplier", self.duration_multiplier)?;
        for (item, factor) in &self.output_multipliers {
            check_factor(&format!("output multiplier for '{item}'"), Some(*factor))?;
        }
        Ok(())
    }
}

fn check_factor(what: &str, factor: Option<f64>) -> Result<()> {
    match factor {
        Some(f) if !f.is_finite() || f < 0.0 => Err(Error::InvalidModifier(format!(
            "{what} must be finite and non-negative, got {f}"
        ))),
        _ => Ok(()),
    }
}

fn compound_outputs(effects: &ModifierEffects, mut computation: Computation) -> Computation {
    for (item, factor) in &effects.output_multipliers {
        computation = computation.compound_output(item, *factor);
    }
    computation
}

/// Applies its effects when the actor knows a key
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeModifier {
    key: KnowledgeKey,
    effects: ModifierEffects,
}

impl KnowledgeModifier {
    pub fn new(key: KnowledgeKey, effects: ModifierEffects) -> Result<Self> {
        effects.validate()?;
        Ok(Self { key, effects })
    }

    pub fn key(&self) -> &KnowledgeKey {
        &self.key
    }

    pub fn effects(&self) -> &ModifierEffects {
        &self.effects
    }
}

impl Modifier for KnowledgeModifier {
    fn apply(
        &self,
        _context: &ReactionContext,
        actor: &ActorSnapshot,
        mut computation: Computation,
    ) -> Computation {
        if !actor.knows(&self.key) {
            return computation;
        }
        if let Some(delta) = self.effects.success_chance_delta {
            computation = computation.add_success_chance(delta);
        }
        if let Some(factor) = self.effects.success_chance_multiplier {
            computation = computation.scale_success_chance(factor);
        }
        if let Some(factor) = self.effects.duration_multiplier {
            computation = computation.scale_duration(factor);
        }
        compound_outputs(&self.effects, computation)
    }
}

/// Scale applied to tool-driven effects: 1.0 at quality 50, 0.6 at or below
/// quality 10, 1.5 at or above quality 100.
pub fn quality_factor(quality: i32) -> f64 {
    1.0 + ((f64::from(quality) - 50.0) / 100.0).clamp(-0.4, 0.5)
}

/// Applies its effects, scaled by tool quality, when the actor owns a tool
///
/// With several matching tools the best quality is used. The success-chance
/// delta is multiplied by [`quality_factor`] and the duration multiplier is
/// divided by it. Success multipliers and output multipliers are unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolModifier {
    tag: ToolTag,
    effects: ModifierEffects,
}

impl ToolModifier {
    pub fn new(tag: ToolTag, effects: ModifierEffects) -> Result<Self> {
        effects.validate()?;
        Ok(Self { tag, effects })
    }

    pub fn tag(&self) -> &ToolTag {
        &self.tag
    }

    pub fn effects(&self) -> &ModifierEffects {
        &self.effects
    }
}

impl Modifier for ToolModifier {
    fn apply(
        &self,
        _context: &ReactionContext,
        actor: &ActorSnapshot,
        mut computation: Computation,
    ) -> Computation {
        let Some(tool) = actor.best_tool(&self.tag) else {
            return computation;
        };
        let factor = quality_factor(tool.quality);

        if let Some(delta) = self.effects.success_chance_delta {
            computation = computation.add_success_chance(delta * factor);
        }
        if let Some(multiplier) = self.effects.success_chance_multiplier {
            computation = computation.scale_success_chance(multiplier);
        }
        if let Some(multiplier) = self.effects.duration_multiplier {
            computation = computation.scale_duration(multiplier / factor);
        }
        compound_outputs(&self.effects, computation)
    }
}
