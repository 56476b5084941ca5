//! Item balances held in memory

use crate::poisoned;
use alembic_core::{ActorId, InventoryPort, ItemTag, PortError, PortResult, Quantity};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

type Balances = IndexMap<ItemTag, i64>;

/// Inventory port with per-actor balances
///
/// `consume` re-checks every requirement under the same lock that debits,
/// so two attempts racing on one actor cannot both spend the same items.
/// The loser gets [`PortError::Conflict`] and nothing is debited.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    balances: Mutex<HashMap<ActorId, Balances>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit items outside of any reaction
    pub fn deposit(&self, actor: ActorId, quantity: Quantity) -> PortResult<()> {
        let mut balances = self.balances.lock().map_err(poisoned)?;
        credit(balances.entry(actor).or_default(), &quantity);
        Ok(())
    }

    /// Current balance of one item
    pub fn balance(&self, actor: ActorId, item: &ItemTag) -> PortResult<i64> {
        let balances = self.balances.lock().map_err(poisoned)?;
        Ok(balances
            .get(&actor)
            .and_then(|held| held.get(item))
            .copied()
            .unwrap_or(0))
    }

    /// Every non-zero balance an actor holds, in first-credited order
    pub fn holdings(&self, actor: ActorId) -> PortResult<Vec<Quantity>> {
        let balances = self.balances.lock().map_err(poisoned)?;
        let Some(held) = balances.get(&actor) else {
            return Ok(Vec::new());
        };
        Ok(held
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .filter_map(|(item, amount)| Quantity::new(item.clone(), *amount).ok())
            .collect())
    }
}

fn covers(held: Option<&Balances>, requirements: &[Quantity]) -> bool {
    // Sum repeated items so a list like [ore:1, ore:1] needs two ore.
    let mut needed: IndexMap<&ItemTag, i64> = IndexMap::new();
    for quantity in requirements {
        let slot = needed.entry(quantity.item()).or_default();
        match slot.checked_add(quantity.amount()) {
            Some(total) => *slot = total,
            // No balance can reach a total past i64::MAX.
            None => return false,
        }
    }
    needed.into_iter().all(|(item, amount)| {
        held.and_then(|h| h.get(item)).copied().unwrap_or(0) >= amount
    })
}

fn credit(held: &mut Balances, quantity: &Quantity) {
    let slot = held.entry(quantity.item().clone()).or_default();
    *slot = slot.saturating_add(quantity.amount());
}

#[async_trait]
impl InventoryPort for MemoryInventory {
    async fn has_items(&self, actor: ActorId, requirements: &[Quantity]) -> PortResult<bool> {
        let balances = self.balances.lock().map_err(poisoned)?;
        Ok(covers(balances.get(&actor), requirements))
    }

    async fn consume(&self, actor: ActorId, inputs: &[Quantity]) -> PortResult<()> {
        let mut balances = self.balances.lock().map_err(poisoned)?;
        if !covers(balances.get(&actor), inputs) {
            return Err(PortError::Conflict(format!(
                "{} no longer holds the required inputs",
                actor
            )));
        }
        if let Some(held) = balances.get_mut(&actor) {
            for quantity in inputs {
                if let Some(slot) = held.get_mut(quantity.item()) {
                    *slot -= quantity.amount();
                }
            }
        }
        debug!(actor = %actor, items = inputs.len(), "inputs consumed");
        Ok(())
    }

    async fn produce(&self, actor: ActorId, outputs: &[Quantity]) -> PortResult<()> {
        let mut balances = self.balances.lock().map_err(poisoned)?;
        let held = balances.entry(actor).or_default();
        for quantity in outputs {
            credit(held, quantity);
        }
        debug!(actor = %actor, items = outputs.len(), "outputs produced");
        Ok(())
    }
}
