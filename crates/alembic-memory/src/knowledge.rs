//! Knowledge sets held in memory

use crate::poisoned;
use alembic_core::{ActorId, KnowledgeKey, KnowledgePort, PortResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Knowledge port keyed by actor
#[derive(Debug, Default)]
pub struct MemoryKnowledge {
    known: RwLock<HashMap<ActorId, HashSet<KnowledgeKey>>>,
}

impl MemoryKnowledge {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgePort for MemoryKnowledge {
    async fn knowledge_set(&self, actor: ActorId) -> PortResult<HashSet<KnowledgeKey>> {
        let known = self.known.read().map_err(poisoned)?;
        Ok(known.get(&actor).cloned().unwrap_or_default())
    }

    async fn grant(&self, actor: ActorId, key: KnowledgeKey) -> PortResult<bool> {
        let mut known = self.known.write().map_err(poisoned)?;
        Ok(known.entry(actor).or_default().insert(key))
    }

    async fn revoke(&self, actor: ActorId, key: &KnowledgeKey) -> PortResult<bool> {
        let mut known = self.known.write().map_err(poisoned)?;
        Ok(known.get_mut(&actor).map(|keys| keys.remove(key)).unwrap_or(false))
    }
}
