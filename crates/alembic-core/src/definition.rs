//! Reaction definitions: immutable authored content

use crate::{Error, Modifier, Precondition, Quantity, ReactionId, Result};
use std::sync::Arc;
use std::time::Duration;

/// An authored craft/production action
///
/// Built once from content through [`ReactionBuilder`] and read-only
/// afterwards. Rules are shared trait objects so a definition can be cloned
/// cheaply and handed out by a repository.
#[derive(Debug, Clone)]
pub struct ReactionDefinition {
    id: ReactionId,
    name: String,
    inputs: Vec<Quantity>,
    outputs: Vec<Quantity>,
    base_duration: Duration,
    base_success_chance: f64,
    preconditions: Vec<Arc<dyn Precondition>>,
    modifiers: Vec<Arc<dyn Modifier>>,
}

impl ReactionDefinition {
    /// Start building a definition
    pub fn builder(id: impl Into<ReactionId>, name: impl Into<String>) -> ReactionBuilder {
        ReactionBuilder::new(id, name)
    }

    pub fn id(&self) -> &ReactionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[Quantity] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Quantity] {
        &self.outputs
    }

    pub fn base_duration(&self) -> Duration {
        self.base_duration
    }

    pub fn base_success_chance(&self) -> f64 {
        self.base_success_chance
    }

    /// Preconditions in authored order
    pub fn preconditions(&self) -> &[Arc<dyn Precondition>] {
        &self.preconditions
    }

    /// Modifiers in authored order; the order is the fold order
    pub fn modifiers(&self) -> &[Arc<dyn Modifier>] {
        &self.modifiers
    }
}

/// Builder for [`ReactionDefinition`]
///
/// `build` is where authoring errors surface: an empty id or a base success
/// chance outside `[0, 1]` is rejected.
pub struct ReactionBuilder {
    id: ReactionId,
    name: String,
    inputs: Vec<Quantity>,
    outputs: Vec<Quantity>,
    base_duration: Duration,
    base_success_chance: f64,
    preconditions: Vec<Arc<dyn Precondition>>,
    modifiers: Vec<Arc<dyn Modifier>>,
}

impl ReactionBuilder {
    /// Create a builder; success chance defaults to 1.0 and duration to zero
    pub fn new(id: impl Into<ReactionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            base_duration: Duration::ZERO,
            base_success_chance: 1.0,
            preconditions: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn input(mut self, quantity: Quantity) -> Self {
        self.inputs.push(quantity);
        self
    }

    pub fn output(mut self, quantity: Quantity) -> Self {
        self.outputs.push(quantity);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.base_duration = duration;
        self
    }

    pub fn success_chance(mut self, chance: f64) -> Self {
        self.base_success_chance = chance;
        self
    }

    /// Append a precondition
    pub fn precondition(self, precondition: impl Precondition + 'static) -> Self {
        self.shared_precondition(Arc::new(precondition))
    }

    /// Append an already shared precondition
    pub fn shared_precondition(mut self, precondition: Arc<dyn Precondition>) -> Self {
        self.preconditions.push(precondition);
        self
    }

    /// Append a modifier; modifiers fold in the order they are appended
    pub fn modifier(self, modifier: impl Modifier + 'static) -> Self {
        self.shared_modifier(Arc::new(modifier))
    }

    /// Append an already shared modifier
    pub fn shared_modifier(mut self, modifier: Arc<dyn Modifier>) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Validate and finish the definition
    pub fn build(self) -> Result<ReactionDefinition> {
        if self.id.is_empty() {
            return Err(Error::InvalidIdentifier { kind: "reaction id" });
        }
        let chance = self.base_success_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(Error::InvalidSuccessChance {
                id: self.id,
                value: chance,
            });
        }

        Ok(ReactionDefinition {
            id: self.id,
            name: self.name,
            inputs: self.inputs,
            outputs: self.outputs,
            base_duration: self.base_duration,
            base_success_chance: chance,
            preconditions: self.preconditions,
            modifiers: self.modifiers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RequiresTool, ToolTag};

    #[test]
    fn test_build_definition() {
        let def = ReactionDefinition::builder("smelt_iron", "Smelt Iron")
            .input(Quantity::of("ore", 2).unwrap())
            .output(Quantity::of("ingot", 1).unwrap())
            .duration(Duration::from_secs(30))
            .success_chance(0.8)
            .precondition(RequiresTool::new(ToolTag::new("anvil").unwrap()))
            .build()
            .unwrap();

        assert_eq!(def.id().as_str(), "smelt_iron");
        assert_eq!(def.name(), "Smelt Iron");
        assert_eq!(def.inputs().len(), 1);
        assert_eq!(def.outputs()[0].amount(), 1);
        assert_eq!(def.base_duration(), Duration::from_secs(30));
        assert_eq!(def.base_success_chance(), 0.8);
        assert_eq!(def.preconditions().len(), 1);
        assert!(def.modifiers().is_empty());

        let debug = format!("{:?}", def);
        assert!(debug.contains("smelt_iron"));
        assert!(debug.contains("RequiresTool"));
    }

    #[test]
    fn test_success_chance_bounds() {
        for ok in [0.0, 0.5, 1.0] {
            assert!(ReactionDefinition::builder("r", "R")
                .success_chance(ok)
                .build()
                .is_ok());
        }
        for bad in [-0.01, 1.0001, f64::NAN, f64::INFINITY] {
            let err = ReactionDefinition::builder("r", "R")
                .success_chance(bad)
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::InvalidSuccessChance { .. }));
        }
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(matches!(
            ReactionDefinition::builder("  ", "Nothing").build(),
            Err(Error::InvalidIdentifier { kind: "reaction id" })
        ));
    }
}
