//! Alembic Script - RON loader and schema definitions
//!
//! Loads reaction content from RON files:
//! - Inputs, outputs, base duration and success chance
//! - Built-in preconditions (`RequiresKnowledge`, `RequiresTool`, `RequiresEnvironment`)
//! - Built-in modifiers (`Knowledge`, `Tool`), folded in the order written

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{Loader, Reactions};
pub use schema::{ModifierDef, PreconditionDef, ReactionDef, ReactionDefs};
