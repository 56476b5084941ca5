//! Terminal outcome of one execution attempt

use crate::Quantity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where an execution attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// A precondition failed; nothing was spent
    Blocked,
    /// Preconditions passed but the inputs were not available; nothing was spent
    InputsMissing,
    /// Inputs were spent and the roll succeeded
    Succeeded,
    /// Inputs were spent and the roll failed
    Failed,
}

impl ExecutionOutcome {
    /// Whether inputs were consumed on the way to this outcome
    pub fn consumed_inputs(&self) -> bool {
        matches!(self, ExecutionOutcome::Succeeded | ExecutionOutcome::Failed)
    }
}

/// Result of [`ReactionEngine::execute`](crate::ReactionEngine::execute)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionResult {
    pub outcome: ExecutionOutcome,
    /// Evaluated duration, the same whatever the outcome
    pub duration: Duration,
    /// Items credited to the actor; empty unless the roll succeeded
    pub produced: Vec<Quantity>,
    /// Reasons the attempt did not go ahead; empty on a completed attempt
    pub notes: Vec<String>,
    /// The value drawn, when a draw took place
    pub roll: Option<f64>,
}

impl ReactionResult {
    pub(crate) fn blocked(duration: Duration, notes: Vec<String>) -> Self {
        Self {
            outcome: ExecutionOutcome::Blocked,
            duration,
            produced: Vec::new(),
            notes,
            roll: None,
        }
    }

    /// The first note is always [`MISSING_INPUTS_NOTE`]; a second one lists
    /// what the reaction asks for.
    pub(crate) fn inputs_missing(duration: Duration, inputs: &[Quantity]) -> Self {
        let mut notes = vec![MISSING_INPUTS_NOTE.to_string()];
        if !inputs.is_empty() {
            let listed: Vec<String> = inputs.iter().map(ToString::to_string).collect();
            notes.push(format!("Requires {}.", listed.join(", ")));
        }
        Self {
            outcome: ExecutionOutcome::InputsMissing,
            duration,
            produced: Vec::new(),
            notes,
            roll: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == ExecutionOutcome::Succeeded
    }
}

/// Note attached when the inventory cannot cover a reaction's inputs
pub const MISSING_INPUTS_NOTE: &str = "Missing required inputs.";
