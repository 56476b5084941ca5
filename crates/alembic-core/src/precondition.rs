//! Preconditions: pass/fail gates checked before a reaction may run
//!
//! A precondition is a pure function of the context and the actor snapshot.
//! The engine runs every precondition of a definition and never looks inside
//! one, so new gates are added by implementing [`Precondition`].

use crate::{ActorSnapshot, KnowledgeKey, ReactionContext, ToolTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason code reported by [`RequiresKnowledge`]
pub const MISSING_KNOWLEDGE: &str = "missing_knowledge";
/// Reason code reported by [`RequiresTool`]
pub const MISSING_TOOL: &str = "missing_tool";
/// Reason code reported by [`RequiresEnvironment`]
pub const WRONG_ENVIRONMENT: &str = "wrong_environment";

/// Outcome of checking one precondition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionResult {
    pub satisfied: bool,
    pub reason_code: Option<String>,
    pub message: Option<String>,
}

impl PreconditionResult {
    /// A passing check
    pub fn satisfied() -> Self {
        Self {
            satisfied: true,
            reason_code: None,
            message: None,
        }
    }

    /// A failing check with a machine-readable reason and a readable message
    pub fn failed(reason_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            satisfied: false,
            reason_code: Some(reason_code.into()),
            message: Some(message.into()),
        }
    }

    /// Text for a result note: the message, else the reason code
    pub fn note(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.reason_code.clone())
            .unwrap_or_else(|| "Precondition not met.".to_string())
    }
}

/// A gate an actor must pass before a reaction may run
///
/// Implementations must be pure: no I/O and no interior mutation.
pub trait Precondition: fmt::Debug + Send + Sync {
    /// Check the gate against the current situation and actor
    fn check(&self, context: &ReactionContext, actor: &ActorSnapshot) -> PreconditionResult;
}

/// Satisfied when the actor knows a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiresKnowledge {
    pub key: KnowledgeKey,
}

impl RequiresKnowledge {
    pub fn new(key: KnowledgeKey) -> Self {
        Self { key }
    }
}

impl Precondition for RequiresKnowledge {
    fn check(&self, _context: &ReactionContext, actor: &ActorSnapshot) -> PreconditionResult {
        if actor.knows(&self.key) {
            PreconditionResult::satisfied()
        } else {
            PreconditionResult::failed(
                MISSING_KNOWLEDGE,
                format!("Requires knowledge '{}'.", self.key),
            )
        }
    }
}

/// Satisfied when the actor owns any tool with a tag, regardless of quality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiresTool {
    pub tag: ToolTag,
}

impl RequiresTool {
    pub fn new(tag: ToolTag) -> Self {
        Self { tag }
    }
}

impl Precondition for RequiresTool {
    fn check(&self, _context: &ReactionContext, actor: &ActorSnapshot) -> PreconditionResult {
        if actor.has_tool(&self.tag) {
            PreconditionResult::satisfied()
        } else {
            PreconditionResult::failed(MISSING_TOOL, format!("Requires tool '{}'.", self.tag))
        }
    }
}

/// Satisfied when the context maps a key to an expected value
///
/// Values are compared trimmed and case-insensitively; keys exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiresEnvironment {
    pub key: String,
    pub value: String,
}

impl RequiresEnvironment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Precondition for RequiresEnvironment {
    fn check(&self, context: &ReactionContext, _actor: &ActorSnapshot) -> PreconditionResult {
        let matches = context
            .get(&self.key)
            .map(|v| v.trim().eq_ignore_ascii_case(self.value.trim()))
            .unwrap_or(false);

        if matches {
            PreconditionResult::satisfied()
        } else {
            PreconditionResult::failed(
                WRONG_ENVIRONMENT,
                format!("Requires {} '{}'.", self.key, self.value),
            )
        }
    }
}
