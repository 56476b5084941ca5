//! Alembic Memory - In-memory implementations of the engine ports
//!
//! Suitable for embedding, tests and tools:
//! - [`MemoryRepository`] - reaction definitions keyed by id
//! - [`MemoryKnowledge`] - knowledge sets per actor
//! - [`MemoryTooling`] - owned tools per actor
//! - [`MemoryInventory`] - item balances with an atomic check-and-debit
//! - [`ScriptedRandom`] - a fixed sequence of rolls
//!
//! All of them are `Send + Sync` and can be shared behind an `Arc`.

mod inventory;
mod knowledge;
mod random;
mod repository;
mod tooling;

pub use inventory::MemoryInventory;
pub use knowledge::MemoryKnowledge;
pub use random::ScriptedRandom;
pub use repository::MemoryRepository;
pub use tooling::MemoryTooling;

use alembic_core::PortError;
use std::sync::PoisonError;

fn poisoned<T>(_: PoisonError<T>) -> PortError {
    PortError::Backend("lock poisoned".to_string())
}
