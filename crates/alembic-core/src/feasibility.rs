//! Side-effect-free evaluation of a reaction for an actor

use crate::{
    ActorSnapshot, Computation, ItemTag, PreconditionResult, Quantity, ReactionContext,
    ReactionDefinition,
};
use indexmap::IndexMap;
use std::time::Duration;

/// Whether and how well a reaction would run right now
///
/// A pure snapshot: safe to discard after a preview or to hand straight to
/// execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionFeasibility {
    pub can_execute: bool,
    /// One entry per precondition, in authored order
    pub precondition_results: Vec<PreconditionResult>,
    pub duration: Duration,
    pub success_chance: f64,
    pub output_multipliers: IndexMap<ItemTag, f64>,
}

impl ReactionFeasibility {
    /// Failing precondition results
    pub fn failures(&self) -> impl Iterator<Item = &PreconditionResult> {
        self.precondition_results.iter().filter(|r| !r.satisfied)
    }

    /// Multiplier for an item, 1.0 when no modifier mentioned it
    pub fn output_multiplier(&self, item: &ItemTag) -> f64 {
        self.output_multipliers.get(item).copied().unwrap_or(1.0)
    }

    /// Apply the multipliers to a definition's outputs
    ///
    /// Amounts are floored and clamped at zero; outputs that come to zero are
    /// left out because a [`Quantity`] is always positive.
    pub fn output_amounts(&self, outputs: &[Quantity]) -> Vec<Quantity> {
        outputs
            .iter()
            .filter_map(|q| {
                let amount = scaled_amount(q.amount(), self.output_multiplier(q.item()));
                Quantity::new(q.item().clone(), amount).ok()
            })
            .collect()
    }
}

/// `floor(amount * multiplier)`, clamped at zero; non-finite products are zero
pub fn scaled_amount(amount: i64, multiplier: f64) -> i64 {
    let product = (amount as f64 * multiplier).floor();
    if product.is_finite() && product > 0.0 {
        // `as` saturates at i64::MAX.
        product as i64
    } else {
        0
    }
}

/// Evaluate a reaction without side effects
///
/// Every precondition runs, even after one fails, so callers can show the
/// complete list of blocking reasons. Modifiers then fold over a computation
/// seeded from the definition's base values, in authored order.
pub fn evaluate(
    reaction: &ReactionDefinition,
    context: &ReactionContext,
    actor: &ActorSnapshot,
) -> ReactionFeasibility {
    let precondition_results: Vec<PreconditionResult> = reaction
        .preconditions()
        .iter()
        .map(|p| p.check(context, actor))
        .collect();
    let can_execute = precondition_results.iter().all(|r| r.satisfied);

    let seed = Computation::seed(reaction.base_success_chance(), reaction.base_duration());
    let computation = reaction
        .modifiers()
        .iter()
        .fold(seed, |acc, m| m.apply(context, actor, acc));
    let (success_chance, duration, output_multipliers) = computation.into_parts();

    ReactionFeasibility {
        can_execute,
        precondition_results,
        duration,
        success_chance,
        output_multipliers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ActorId, KnowledgeKey, KnowledgeModifier, Modifier, ModifierEffects, RequiresKnowledge,
        RequiresTool, ToolInstance, ToolModifier, ToolTag,
    };

    fn key(s: &str) -> KnowledgeKey {
        KnowledgeKey::new(s).unwrap()
    }

    fn item(s: &str) -> ItemTag {
        ItemTag::new(s).unwrap()
    }

    fn actor(knowledge: &[&str], tools: Vec<ToolInstance>) -> ActorSnapshot {
        ActorSnapshot::new(
            ActorId::new(1),
            knowledge.iter().map(|k| key(k)).collect(),
            tools,
        )
    }

    #[test]
    fn test_scaled_amount() {
        assert_eq!(scaled_amount(2, 1.5), 3);
        assert_eq!(scaled_amount(3, 1.5), 4);
        assert_eq!(scaled_amount(1, 0.99), 0);
        assert_eq!(scaled_amount(5, -2.0), 0);
        assert_eq!(scaled_amount(5, f64::NAN), 0);
        assert_eq!(scaled_amount(7, 1.0), 7);
    }

    #[test]
    fn test_all_preconditions_reported() {
        let def = ReactionDefinition::builder("forge_blade", "Forge Blade")
            .precondition(RequiresKnowledge::new(key("bladesmithing")))
            .precondition(RequiresTool::new(ToolTag::new("anvil").unwrap()))
            .precondition(RequiresTool::new(ToolTag::new("hammer").unwrap()))
            .build()
            .unwrap();

        let actor = actor(&[], vec![ToolInstance::of("hammer", 50).unwrap()]);
        let feasibility = evaluate(&def, &ReactionContext::new(), &actor);

        assert!(!feasibility.can_execute);
        assert_eq!(feasibility.precondition_results.len(), 3);
        let codes: Vec<_> = feasibility
            .failures()
            .filter_map(|r| r.reason_code.as_deref())
            .collect();
        assert_eq!(codes, vec!["missing_knowledge", "missing_tool"]);
        assert!(feasibility.precondition_results[2].satisfied);
    }

    #[test]
    fn test_no_preconditions_can_execute() {
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .success_chance(0.8)
            .duration(Duration::from_secs(30))
            .build()
            .unwrap();
        let feasibility = evaluate(&def, &ReactionContext::new(), &actor(&[], vec![]));
        assert!(feasibility.can_execute);
        assert_eq!(feasibility.success_chance, 0.8);
        assert_eq!(feasibility.duration, Duration::from_secs(30));
        assert!(feasibility.output_multipliers.is_empty());
    }

    #[test]
    fn test_knowledge_bonus() {
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .success_chance(0.8)
            .modifier(
                KnowledgeModifier::new(
                    key("masterSmith"),
                    ModifierEffects::new().success_chance_delta(0.1),
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let feasibility = evaluate(&def, &ReactionContext::new(), &actor(&["mastersmith"], vec![]));
        assert!((feasibility.success_chance - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_tool_output_bonus_at_max_quality() {
        let anvil = ToolTag::new("anvil").unwrap();
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .output(Quantity::of("ingot", 2).unwrap())
            .modifier(
                ToolModifier::new(
                    anvil.clone(),
                    ModifierEffects::new().output_multiplier(item("ingot"), 1.5),
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let actor = actor(&[], vec![ToolInstance::new(anvil, 100)]);
        let feasibility = evaluate(&def, &ReactionContext::new(), &actor);

        let produced = feasibility.output_amounts(def.outputs());
        assert_eq!(produced, vec![Quantity::of("ingot", 3).unwrap()]);
    }

    #[test]
    fn test_modifier_order_is_fold_order() {
        let add = KnowledgeModifier::new(
            key("smithing"),
            ModifierEffects::new().success_chance_delta(0.1),
        )
        .unwrap();
        let halve = KnowledgeModifier::new(
            key("smithing"),
            ModifierEffects::new().success_chance_multiplier(0.5),
        )
        .unwrap();
        let smith = actor(&["smithing"], vec![]);

        let add_first = ReactionDefinition::builder("a", "A")
            .success_chance(0.5)
            .modifier(add.clone())
            .modifier(halve.clone())
            .build()
            .unwrap();
        let halve_first = ReactionDefinition::builder("b", "B")
            .success_chance(0.5)
            .modifier(halve)
            .modifier(add)
            .build()
            .unwrap();

        let ctx = ReactionContext::new();
        assert!((evaluate(&add_first, &ctx, &smith).success_chance - 0.30).abs() < 1e-12);
        assert!((evaluate(&halve_first, &ctx, &smith).success_chance - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_output_multipliers_compound_across_modifiers() {
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .output(Quantity::of("ingot", 2).unwrap())
            .modifier(
                KnowledgeModifier::new(
                    key("smithing"),
                    ModifierEffects::new().output_multiplier(item("ingot"), 1.5),
                )
                .unwrap(),
            )
            .modifier(
                ToolModifier::new(
                    ToolTag::new("anvil").unwrap(),
                    ModifierEffects::new().output_multiplier(item("ingot"), 2.0),
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let smith = actor(&["smithing"], vec![ToolInstance::of("anvil", 50).unwrap()]);
        let feasibility = evaluate(&def, &ReactionContext::new(), &smith);

        assert_eq!(feasibility.output_multiplier(&item("ingot")), 3.0);
        assert_eq!(
            feasibility.output_amounts(def.outputs()),
            vec![Quantity::of("ingot", 6).unwrap()]
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .success_chance(0.6)
            .duration(Duration::from_secs(45))
            .output(Quantity::of("ingot", 1).unwrap())
            .modifier(
                ToolModifier::new(
                    ToolTag::new("anvil").unwrap(),
                    ModifierEffects::new()
                        .success_chance_delta(0.2)
                        .duration_multiplier(0.8)
                        .output_multiplier(item("ingot"), 1.7),
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        let smith = actor(&[], vec![ToolInstance::of("anvil", 73).unwrap()]);
        let ctx = ReactionContext::new().with("station", "forge");

        let first = evaluate(&def, &ctx, &smith);
        for _ in 0..5 {
            assert_eq!(evaluate(&def, &ctx, &smith), first);
        }
    }

    #[derive(Debug)]
    struct NightShift;

    impl Modifier for NightShift {
        fn apply(
            &self,
            context: &ReactionContext,
            _actor: &ActorSnapshot,
            computation: Computation,
        ) -> Computation {
            if context.get("time_of_day") == Some("night") {
                computation.scale_duration(2.0)
            } else {
                computation
            }
        }
    }

    #[test]
    fn test_custom_modifier_reads_context() {
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .duration(Duration::from_secs(10))
            .modifier(NightShift)
            .build()
            .unwrap();
        let smith = actor(&[], vec![]);

        let day = evaluate(&def, &ReactionContext::new().with("time_of_day", "day"), &smith);
        let night = evaluate(&def, &ReactionContext::new().with("time_of_day", "night"), &smith);
        assert_eq!(day.duration, Duration::from_secs(10));
        assert_eq!(night.duration, Duration::from_secs(20));
    }
}
