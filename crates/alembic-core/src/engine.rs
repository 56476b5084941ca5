//! Reaction engine: snapshot assembly, feasibility and execution
//!
//! The engine owns no mutable state. Each call loads what it needs through
//! the ports, builds a fresh [`ActorSnapshot`], evaluates, and (for
//! [`execute`](ReactionEngine::execute)) drives the inventory and randomness
//! ports through one attempt:
//!
//! ```text
//! NotStarted -> FeasibilityChecked -> Blocked
//!                                  -> InputsMissing
//!                                  -> InputsConsumed -> Succeeded | Failed
//! ```
//!
//! There are no retries; a caller that wants another attempt calls again.

use crate::feasibility;
use crate::{
    ActorId, ActorSnapshot, EngineConfig, Error, ExecutionOutcome, InventoryPort, KnowledgePort,
    PreconditionResult, RandomSource, ReactionContext, ReactionDefinition, ReactionFeasibility,
    ReactionId, ReactionRepository, ReactionResult, Result, ToolingPort, ZeroChancePolicy,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Orchestrates reactions against the five ports
pub struct ReactionEngine {
    repository: Arc<dyn ReactionRepository>,
    knowledge: Arc<dyn KnowledgePort>,
    tooling: Arc<dyn ToolingPort>,
    inventory: Arc<dyn InventoryPort>,
    random: Arc<dyn RandomSource>,
    config: EngineConfig,
}

impl ReactionEngine {
    /// Create an engine with the default configuration
    pub fn new(
        repository: Arc<dyn ReactionRepository>,
        knowledge: Arc<dyn KnowledgePort>,
        tooling: Arc<dyn ToolingPort>,
        inventory: Arc<dyn InventoryPort>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            repository,
            knowledge,
            tooling,
            inventory,
            random,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Query knowledge and tools and assemble a fresh snapshot
    ///
    /// Read-only; nothing is cached between calls.
    #[instrument(level = "debug", skip_all, fields(actor = %actor_id))]
    pub async fn build_actor(&self, actor_id: ActorId) -> Result<ActorSnapshot> {
        let knowledge = self.knowledge.knowledge_set(actor_id).await?;
        let tools = self.tooling.tools(actor_id).await?;
        debug!(
            knowledge = knowledge.len(),
            tools = tools.len(),
            "actor snapshot built"
        );
        Ok(ActorSnapshot::new(actor_id, knowledge, tools))
    }

    /// Evaluate a reaction for an actor without side effects
    ///
    /// See [`feasibility::evaluate`].
    pub fn evaluate(
        &self,
        reaction: &ReactionDefinition,
        context: &ReactionContext,
        actor: &ActorSnapshot,
    ) -> ReactionFeasibility {
        feasibility::evaluate(reaction, context, actor)
    }

    /// Load a reaction, snapshot the actor and evaluate
    ///
    /// Never touches the inventory or randomness ports.
    #[instrument(skip_all, fields(reaction = %reaction_id, actor = %actor_id))]
    pub async fn preview(
        &self,
        reaction_id: &ReactionId,
        actor_id: ActorId,
        context: &ReactionContext,
    ) -> Result<ReactionFeasibility> {
        let reaction = self.load(reaction_id).await?;
        let actor = self.build_actor(actor_id).await?;
        Ok(self.evaluate(&reaction, context, &actor))
    }

    /// Attempt a reaction
    ///
    /// Blocked attempts and missing inputs return a failed result with notes
    /// and leave the inventory untouched. Otherwise the inputs are consumed
    /// before the roll, whatever it turns out to be, and outputs are produced
    /// only on success.
    ///
    /// An unknown reaction id is an error, as is any port failure.
    #[instrument(skip_all, fields(reaction = %reaction_id, actor = %actor_id))]
    pub async fn execute(
        &self,
        reaction_id: &ReactionId,
        actor_id: ActorId,
        context: &ReactionContext,
    ) -> Result<ReactionResult> {
        let reaction = self.load(reaction_id).await?;
        let actor = self.build_actor(actor_id).await?;
        let feasibility = self.evaluate(&reaction, context, &actor);
        debug!(
            can_execute = feasibility.can_execute,
            success_chance = feasibility.success_chance,
            duration_ms = feasibility.duration.as_millis() as u64,
            "feasibility checked"
        );

        if !feasibility.can_execute {
            let notes: Vec<String> = feasibility.failures().map(PreconditionResult::note).collect();
            warn!(failures = notes.len(), "reaction blocked");
            return Ok(ReactionResult::blocked(feasibility.duration, notes));
        }

        if !self
            .inventory
            .has_items(actor_id, reaction.inputs())
            .await?
        {
            warn!(inputs = reaction.inputs().len(), "reaction inputs missing");
            return Ok(ReactionResult::inputs_missing(
                feasibility.duration,
                reaction.inputs(),
            ));
        }

        // Paid on attempt, not on success.
        self.inventory.consume(actor_id, reaction.inputs()).await?;

        let roll = self.draw(feasibility.success_chance);
        let succeeded = roll.is_some_and(|r| r <= feasibility.success_chance);

        let produced = if succeeded {
            let outputs = feasibility.output_amounts(reaction.outputs());
            if !outputs.is_empty() {
                self.inventory.produce(actor_id, &outputs).await?;
            }
            outputs
        } else {
            Vec::new()
        };

        let outcome = if succeeded {
            ExecutionOutcome::Succeeded
        } else {
            ExecutionOutcome::Failed
        };
        info!(
            ?outcome,
            roll = ?roll,
            success_chance = feasibility.success_chance,
            produced = produced.len(),
            "reaction attempted"
        );

        Ok(ReactionResult {
            outcome,
            duration: feasibility.duration,
            produced,
            notes: Vec::new(),
            roll,
        })
    }

    async fn load(&self, id: &ReactionId) -> Result<Arc<ReactionDefinition>> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::ReactionNotFound(id.clone()))
    }

    fn draw(&self, success_chance: f64) -> Option<f64> {
        if success_chance == 0.0 && self.config.zero_chance_policy == ZeroChancePolicy::AlwaysFail
        {
            debug!("zero success chance, draw skipped");
            return None;
        }
        Some(self.random.next_unit())
    }
}
