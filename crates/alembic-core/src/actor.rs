//! Actor snapshots
//!
//! An actor is the character attempting a reaction. The engine never holds a
//! live handle to one: every evaluation works on a fresh, immutable snapshot
//! of what the actor knows and which tools they own at that moment.

use crate::{ActorId, KnowledgeKey, ToolInstance, ToolTag};
use std::collections::HashSet;

/// Immutable view of an actor's knowledge and tools for a single call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSnapshot {
    actor_id: ActorId,
    knowledge: HashSet<KnowledgeKey>,
    tools: Vec<ToolInstance>,
}

impl ActorSnapshot {
    /// Create a snapshot
    pub fn new(
        actor_id: ActorId,
        knowledge: HashSet<KnowledgeKey>,
        tools: Vec<ToolInstance>,
    ) -> Self {
        Self {
            actor_id,
            knowledge,
            tools,
        }
    }

    /// The actor this snapshot describes
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Everything the actor knows
    pub fn knowledge(&self) -> &HashSet<KnowledgeKey> {
        &self.knowledge
    }

    /// Tools the actor owns or has equipped
    pub fn tools(&self) -> &[ToolInstance] {
        &self.tools
    }

    /// Check if the actor knows a key
    pub fn knows(&self, key: &KnowledgeKey) -> bool {
        self.knowledge.contains(key)
    }

    /// Check if the actor owns any tool with this tag, regardless of quality
    pub fn has_tool(&self, tag: &ToolTag) -> bool {
        self.tools.iter().any(|t| &t.tag == tag)
    }

    /// Highest-quality tool with this tag, if any
    pub fn best_tool(&self, tag: &ToolTag) -> Option<&ToolInstance> {
        self.tools
            .iter()
            .filter(|t| &t.tag == tag)
            .max_by_key(|t| t.quality)
    }
}
