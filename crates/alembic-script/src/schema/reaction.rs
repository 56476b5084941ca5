//! Reaction definition schema

use crate::error::{Error, Result};
use alembic_core::{
    KnowledgeKey, KnowledgeModifier, ModifierEffects, Quantity, ReactionDefinition, ReactionId,
    RequiresEnvironment, RequiresKnowledge, RequiresTool, ToolModifier, ToolTag,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A reaction as authored in RON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionDef {
    /// Unique identifier for this reaction
    pub id: ReactionId,
    /// Display name
    pub name: String,
    /// Items spent on every attempt
    #[serde(default)]
    pub inputs: Vec<Quantity>,
    /// Items credited on success, before multipliers
    #[serde(default)]
    pub outputs: Vec<Quantity>,
    /// Base duration in seconds
    #[serde(default)]
    pub base_duration_secs: f64,
    /// Base probability of success, in [0, 1]
    #[serde(default = "default_success_chance")]
    pub base_success_chance: f64,
    #[serde(default)]
    pub preconditions: Vec<PreconditionDef>,
    /// Folded in this order
    #[serde(default)]
    pub modifiers: Vec<ModifierDef>,
}

fn default_success_chance() -> f64 {
    1.0
}

/// Built-in precondition variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreconditionDef {
    RequiresKnowledge(KnowledgeKey),
    RequiresTool(ToolTag),
    RequiresEnvironment { key: String, value: String },
}

/// Built-in modifier variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModifierDef {
    Knowledge {
        key: KnowledgeKey,
        #[serde(default)]
        effects: ModifierEffects,
    },
    Tool {
        tag: ToolTag,
        #[serde(default)]
        effects: ModifierEffects,
    },
}

impl ReactionDef {
    /// Validate and convert into an engine definition
    pub fn build(&self) -> Result<ReactionDefinition> {
        let duration = Duration::try_from_secs_f64(self.base_duration_secs).map_err(|_| {
            Error::InvalidSchema(format!(
                "reaction '{}': base_duration_secs must be a non-negative number, got {}",
                self.id, self.base_duration_secs
            ))
        })?;

        let mut builder = ReactionDefinition::builder(self.id.clone(), self.name.clone())
            .duration(duration)
            .success_chance(self.base_success_chance);

        for input in &self.inputs {
            builder = builder.input(input.clone());
        }
        for output in &self.outputs {
            builder = builder.output(output.clone());
        }

        for precondition in &self.preconditions {
            builder = match precondition {
                PreconditionDef::RequiresKnowledge(key) => {
                    builder.precondition(RequiresKnowledge::new(key.clone()))
                }
                PreconditionDef::RequiresTool(tag) => {
                    builder.precondition(RequiresTool::new(tag.clone()))
                }
                PreconditionDef::RequiresEnvironment { key, value } => {
                    builder.precondition(RequiresEnvironment::new(key.clone(), value.clone()))
                }
            };
        }

        for modifier in &self.modifiers {
            builder = match modifier {
                ModifierDef::Knowledge { key, effects } => {
                    builder.modifier(KnowledgeModifier::new(key.clone(), effects.clone())?)
                }
                ModifierDef::Tool { tag, effects } => {
                    builder.modifier(ToolModifier::new(tag.clone(), effects.clone())?)
                }
            };
        }

        Ok(builder.build()?)
    }
}

/// A collection of reaction definitions
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReactionDefs {
    pub reactions: Vec<ReactionDef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alembic_core::{ActorId, ActorSnapshot, ReactionContext, ToolInstance};

    #[test]
    fn test_reaction_def_ron() {
        let ron_str = r#"
        (
            id: "smelt_iron",
            name: "Smelt Iron",
            inputs: [(item: "ore", amount: 2)],
            outputs: [(item: "ingot", amount: 1)],
            base_duration_secs: 30.0,
            base_success_chance: 0.8,
            preconditions: [
                RequiresTool("Anvil"),
                RequiresEnvironment(key: "station", value: "forge"),
            ],
            modifiers: [
                Knowledge(key: "masterSmith", effects: (success_chance_delta: Some(0.1))),
                Tool(tag: "anvil", effects: (output_multipliers: {"ingot": 1.5})),
            ],
        )
        "#;

        let def: ReactionDef = ron::from_str(ron_str).unwrap();
        assert_eq!(def.id.as_str(), "smelt_iron");
        assert_eq!(def.preconditions[0], PreconditionDef::RequiresTool(ToolTag::new("anvil").unwrap()));

        let built = def.build().unwrap();
        assert_eq!(built.base_duration(), Duration::from_secs(30));
        assert_eq!(built.preconditions().len(), 2);
        assert_eq!(built.modifiers().len(), 2);

        let actor = ActorSnapshot::new(
            ActorId::new(1),
            [KnowledgeKey::new("mastersmith").unwrap()].into_iter().collect(),
            vec![ToolInstance::of("anvil", 100).unwrap()],
        );
        let ctx = ReactionContext::new().with("station", "forge");
        let feasibility = alembic_core::feasibility::evaluate(&built, &ctx, &actor);
        assert!(feasibility.can_execute);
        assert!((feasibility.success_chance - 0.9).abs() < 1e-12);
        assert_eq!(
            feasibility.output_amounts(built.outputs()),
            vec![Quantity::of("ingot", 1).unwrap()]
        );
    }

    #[test]
    fn test_defaults() {
        let def: ReactionDef = ron::from_str(r#"(id: "idle", name: "Idle")"#).unwrap();
        assert_eq!(def.base_success_chance, 1.0);
        let built = def.build().unwrap();
        assert_eq!(built.base_duration(), Duration::ZERO);
        assert!(built.inputs().is_empty());
    }

    #[test]
    fn test_out_of_range_chance_is_rejected() {
        let def: ReactionDef =
            ron::from_str(r#"(id: "bad", name: "Bad", base_success_chance: 1.5)"#).unwrap();
        assert!(matches!(
            def.build(),
            Err(Error::Core(alembic_core::Error::InvalidSuccessChance { .. }))
        ));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let def: ReactionDef =
            ron::from_str(r#"(id: "bad", name: "Bad", base_duration_secs: -1.0)"#).unwrap();
        assert!(matches!(def.build(), Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn test_invalid_modifier_is_rejected() {
        let def: ReactionDef = ron::from_str(
            r#"(
                id: "bad",
                name: "Bad",
                modifiers: [Tool(tag: "anvil", effects: (duration_multiplier: Some(-2.0)))],
            )"#,
        )
        .unwrap();
        assert!(matches!(
            def.build(),
            Err(Error::Core(alembic_core::Error::InvalidModifier(_)))
        ));
    }

    #[test]
    fn test_zero_amount_fails_to_parse() {
        let result = ron::from_str::<ReactionDef>(
            r#"(id: "bad", name: "Bad", inputs: [(item: "ore", amount: 0)])"#,
        );
        assert!(result.is_err());
    }
}
