//! Ports: the engine's only boundary with the outside world
//!
//! Five narrow contracts:
//! - [`ReactionRepository`] - authored definitions
//! - [`KnowledgePort`] - what an actor knows
//! - [`ToolingPort`] - which tools an actor owns and at what quality
//! - [`InventoryPort`] - item balances
//! - [`RandomSource`] - uniform draws in `[0, 1)`
//!
//! Async ports may suspend; cancellation is dropping the future. Deadlines
//! belong to the implementation.

use crate::{ActorId, KnowledgeKey, Quantity, ReactionDefinition, ReactionId, ToolInstance};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a port implementation
#[derive(Debug, Error)]
pub enum PortError {
    /// Backend could not be reached
    #[error("Port unavailable: {0}")]
    Unavailable(String),

    /// Concurrent modification detected; the operation was not applied
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Key already exists
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// Record to update or remove does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for port operations
pub type PortResult<T> = std::result::Result<T, PortError>;

/// Storage of authored reaction definitions
///
/// The engine only reads through `find_by_id`; the authoring operations are
/// for content tooling.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn find_by_id(&self, id: &ReactionId) -> PortResult<Option<Arc<ReactionDefinition>>>;

    async fn list_all(&self) -> PortResult<Vec<Arc<ReactionDefinition>>>;

    /// Add a definition; fails with [`PortError::Duplicate`] if the id exists
    async fn add(&self, definition: ReactionDefinition) -> PortResult<()>;

    /// Replace a definition; fails with [`PortError::NotFound`] if the id is unknown
    async fn update(&self, definition: ReactionDefinition) -> PortResult<()>;

    /// Remove a definition, returning whether it existed
    async fn remove(&self, id: &ReactionId) -> PortResult<bool>;
}

/// What actors know
#[async_trait]
pub trait KnowledgePort: Send + Sync {
    async fn knowledge_set(&self, actor: ActorId) -> PortResult<HashSet<KnowledgeKey>>;

    /// Grant a key, returning whether it was newly granted
    async fn grant(&self, actor: ActorId, key: KnowledgeKey) -> PortResult<bool>;

    /// Revoke a key, returning whether it was held
    async fn revoke(&self, actor: ActorId, key: &KnowledgeKey) -> PortResult<bool>;
}

/// Tools actors currently own or have equipped
#[async_trait]
pub trait ToolingPort: Send + Sync {
    async fn tools(&self, actor: ActorId) -> PortResult<Vec<ToolInstance>>;
}

/// Item balances
///
/// The engine checks with `has_items` and then calls `consume` as a separate
/// step. Implementations must serialize these per actor (a lock, or a
/// transaction with an optimistic re-check in `consume`) so two concurrent
/// attempts cannot spend the same items. The engine adds no locking.
#[async_trait]
pub trait InventoryPort: Send + Sync {
    /// Whether the actor holds at least every listed quantity
    async fn has_items(&self, actor: ActorId, requirements: &[Quantity]) -> PortResult<bool>;

    /// Debit the listed quantities
    async fn consume(&self, actor: ActorId, inputs: &[Quantity]) -> PortResult<()>;

    /// Credit the listed quantities
    async fn produce(&self, actor: ActorId, outputs: &[Quantity]) -> PortResult<()>;
}

/// Uniform randomness
pub trait RandomSource: Send + Sync {
    /// Next value in `[0, 1)`
    fn next_unit(&self) -> f64;
}
