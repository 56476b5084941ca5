//! Error types for alembic-core

use crate::ports::PortError;
use crate::ReactionId;
use thiserror::Error;

/// Core error type
///
/// Every variant here is an invariant violation or a port failure. Expected
/// business outcomes (a missing tool, a losing roll) are reported as data in
/// [`ReactionFeasibility`](crate::ReactionFeasibility) and
/// [`ReactionResult`](crate::ReactionResult), never as errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {kind}: identifier is empty after normalization")]
    InvalidIdentifier { kind: &'static str },

    #[error("Invalid quantity for '{item}': amount must be positive, got {amount}")]
    InvalidQuantity { item: String, amount: i64 },

    #[error("Reaction '{id}': base success chance {value} is outside [0, 1]")]
    InvalidSuccessChance { id: ReactionId, value: f64 },

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Reaction not found: {0}")]
    ReactionNotFound(ReactionId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Port error: {0}")]
    Port(#[from] PortError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Engine futures carry this error across threads.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
