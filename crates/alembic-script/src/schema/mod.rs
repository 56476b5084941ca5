//! Schema definitions for RON scripts

pub mod reaction;

pub use reaction::{ModifierDef, PreconditionDef, ReactionDef, ReactionDefs};
