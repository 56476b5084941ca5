//! Reaction definitions held in memory

use crate::poisoned;
use alembic_core::{PortError, PortResult, ReactionDefinition, ReactionId, ReactionRepository};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// Reaction repository backed by an insertion-ordered map
#[derive(Debug, Default)]
pub struct MemoryRepository {
    definitions: RwLock<IndexMap<ReactionId, Arc<ReactionDefinition>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from loaded content, rejecting duplicate ids
    pub fn with_definitions(
        definitions: impl IntoIterator<Item = ReactionDefinition>,
    ) -> PortResult<Self> {
        let mut map = IndexMap::new();
        for definition in definitions {
            let id = definition.id().clone();
            if map.contains_key(&id) {
                return Err(PortError::Duplicate(id.to_string()));
            }
            map.insert(id, Arc::new(definition));
        }
        Ok(Self {
            definitions: RwLock::new(map),
        })
    }
}

#[async_trait]
impl ReactionRepository for MemoryRepository {
    async fn find_by_id(&self, id: &ReactionId) -> PortResult<Option<Arc<ReactionDefinition>>> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.get(id).cloned())
    }

    async fn list_all(&self) -> PortResult<Vec<Arc<ReactionDefinition>>> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.values().cloned().collect())
    }

    async fn add(&self, definition: ReactionDefinition) -> PortResult<()> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        let id = definition.id().clone();
        if definitions.contains_key(&id) {
            return Err(PortError::Duplicate(id.to_string()));
        }
        definitions.insert(id, Arc::new(definition));
        Ok(())
    }

    async fn update(&self, definition: ReactionDefinition) -> PortResult<()> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        match definitions.get_mut(definition.id()) {
            Some(slot) => {
                *slot = Arc::new(definition);
                Ok(())
            }
            None => Err(PortError::NotFound(definition.id().to_string())),
        }
    }

    async fn remove(&self, id: &ReactionId) -> PortResult<bool> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        Ok(definitions.shift_remove(id).is_some())
    }
}
