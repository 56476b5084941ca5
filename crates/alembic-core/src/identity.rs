//! Identity types for actors, reactions and normalized content handles

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an actor (a character attempting reactions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Create a new actor ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Identifier for a reaction definition loaded from content
///
/// String-based so it can be referenced from RON scripts. Surrounding
/// whitespace is trimmed; case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReactionId(String);

impl ReactionId {
    /// Create a new reaction ID
    ///
    /// An empty id is accepted here and rejected when a
    /// [`ReactionDefinition`](crate::ReactionDefinition) is built with it.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReactionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ReactionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<ReactionId> for String {
    fn from(id: ReactionId) -> String {
        id.0
    }
}

/// Trim and lower-case a handle, rejecting empty results.
fn normalize(raw: &str, kind: &'static str) -> Result<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(Error::InvalidIdentifier { kind });
    }
    Ok(normalized)
}

macro_rules! normalized_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a handle from raw text, trimming and lower-casing it
            pub fn new(raw: impl AsRef<str>) -> Result<Self> {
                normalize(raw.as_ref(), $kind).map(Self)
            }

            /// Get the normalized handle as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(handle: $name) -> String {
                handle.0
            }
        }
    };
}

normalized_handle!(
    /// A piece of knowledge an actor may hold (a recipe, a technique)
    KnowledgeKey,
    "knowledge key"
);

normalized_handle!(
    /// The kind of a tool (anvil, crucible, loom)
    ToolTag,
    "tool tag"
);

normalized_handle!(
    /// The kind of an inventory item (ore, ingot)
    ItemTag,
    "item tag"
);
