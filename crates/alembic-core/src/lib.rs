//! Alembic Core - Reaction engine for crafting and production actions
//!
//! This crate provides the types and engine for "reactions": actions an
//! actor may attempt, gated by knowledge and tools, with a probabilistic
//! outcome and composable bonuses and penalties:
//! - Normalized handles (`KnowledgeKey`, `ToolTag`, `ItemTag`)
//! - Authored definitions (`ReactionDefinition`) with ordered rules
//! - Open rule contracts (`Precondition`, `Modifier`) and their built-ins
//! - Side-effect-free evaluation (`ReactionFeasibility`)
//! - Execution against five async ports (`ReactionEngine`)
//!
//! ## Cost on attempt
//!
//! Once preconditions pass and the inputs are available, executing a
//! reaction spends the inputs before rolling. A losing roll produces nothing
//! and the inputs stay spent.

mod actor;
mod computation;
mod config;
mod context;
mod definition;
pub mod engine;
mod error;
pub mod feasibility;
mod identity;
pub mod modifier;
mod outcome;
pub mod ports;
pub mod precondition;
mod quantity;
mod rng;

pub use actor::ActorSnapshot;
pub use computation::Computation;
pub use config::{EngineConfig, ZeroChancePolicy};
pub use context::ReactionContext;
pub use definition::{ReactionBuilder, ReactionDefinition};
pub use engine::ReactionEngine;
pub use error::{Error, Result};
pub use feasibility::ReactionFeasibility;
pub use identity::{ActorId, ItemTag, KnowledgeKey, ReactionId, ToolTag};
pub use modifier::{quality_factor, KnowledgeModifier, Modifier, ModifierEffects, ToolModifier};
pub use outcome::{ExecutionOutcome, ReactionResult, MISSING_INPUTS_NOTE};
pub use ports::{
    InventoryPort, KnowledgePort, PortError, PortResult, RandomSource, ReactionRepository,
    ToolingPort,
};
pub use precondition::{
    Precondition, PreconditionResult, RequiresEnvironment, RequiresKnowledge, RequiresTool,
};
pub use quantity::{Quantity, ToolInstance};
pub use rng::{GameRng, SeededRandom};
