//! Situational flags supplied with every check

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only situation a reaction is attempted in (location, station, time of day)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionContext {
    environment: IndexMap<String, String>,
}

impl ReactionContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment entry
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Look up an environment entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// All environment entries in insertion order
    pub fn environment(&self) -> &IndexMap<String, String> {
        &self.environment
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReactionContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            environment: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
