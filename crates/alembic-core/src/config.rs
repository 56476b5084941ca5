//! Engine configuration
//!
//! Loaded from RON alongside the game content:
//!
//! ```ron
//! (zero_chance_policy: AlwaysFail)
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a success chance of exactly zero is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroChancePolicy {
    /// Draw as usual; the attempt succeeds only on a roll of exactly 0.0
    #[default]
    Roll,
    /// Skip the draw and fail. Inputs are still consumed.
    AlwaysFail,
}

/// Configuration for [`ReactionEngine`](crate::ReactionEngine)
///
/// # Example
///
/// ```
/// use alembic_core::{EngineConfig, ZeroChancePolicy};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.zero_chance_policy, ZeroChancePolicy::Roll);
///
/// let config = EngineConfig::from_ron_str("(zero_chance_policy: AlwaysFail)").unwrap();
/// assert_eq!(config.zero_chance_policy, ZeroChancePolicy::AlwaysFail);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub zero_chance_policy: ZeroChancePolicy,
}

impl EngineConfig {
    /// Parse configuration from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }

    pub fn with_zero_chance_policy(mut self, policy: ZeroChancePolicy) -> Self {
        self.zero_chance_policy = policy;
        self
    }
}
