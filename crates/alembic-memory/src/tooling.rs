//! Owned tools held in memory

use crate::poisoned;
use alembic_core::{ActorId, PortResult, ToolInstance, ToolTag, ToolingPort};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Tooling port keyed by actor
#[derive(Debug, Default)]
pub struct MemoryTooling {
    tools: RwLock<HashMap<ActorId, Vec<ToolInstance>>>,
}

impl MemoryTooling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give an actor a tool
    pub fn equip(&self, actor: ActorId, tool: ToolInstance) -> PortResult<()> {
        let mut tools = self.tools.write().map_err(poisoned)?;
        tools.entry(actor).or_default().push(tool);
        Ok(())
    }

    /// Take away every tool with a tag, returning how many were removed
    pub fn unequip(&self, actor: ActorId, tag: &ToolTag) -> PortResult<usize> {
        let mut tools = self.tools.write().map_err(poisoned)?;
        let Some(owned) = tools.get_mut(&actor) else {
            return Ok(0);
        };
        let before = owned.len();
        owned.retain(|t| &t.tag != tag);
        Ok(before - owned.len())
    }
}

#[async_trait]
impl ToolingPort for MemoryTooling {
    async fn tools(&self, actor: ActorId) -> PortResult<Vec<ToolInstance>> {
        let tools = self.tools.read().map_err(poisoned)?;
        Ok(tools.get(&actor).cloned().unwrap_or_default())
    }
}
