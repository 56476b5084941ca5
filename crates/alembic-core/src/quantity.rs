//! Value records: how much of which item, and which tool at what quality

use crate::{Error, ItemTag, Result, ToolTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of one item kind
///
/// The amount is always positive; constructing a non-positive quantity fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuantity", into = "RawQuantity")]
pub struct Quantity {
    item: ItemTag,
    amount: i64,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(item: ItemTag, amount: i64) -> Result<Self> {
        if amount <= 0 {
            return Err(Error::InvalidQuantity {
                item: item.to_string(),
                amount,
            });
        }
        Ok(Self { item, amount })
    }

    /// Parse the item tag and build the quantity in one step
    pub fn of(item: impl AsRef<str>, amount: i64) -> Result<Self> {
        Self::new(ItemTag::new(item)?, amount)
    }

    /// The item kind
    pub fn item(&self) -> &ItemTag {
        &self.item
    }

    /// The amount, always greater than zero
    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.item, self.amount)
    }
}

#[derive(Serialize, Deserialize)]
struct RawQuantity {
    item: ItemTag,
    amount: i64,
}

impl TryFrom<RawQuantity> for Quantity {
    type Error = Error;

    fn try_from(raw: RawQuantity) -> Result<Self> {
        Quantity::new(raw.item, raw.amount)
    }
}

impl From<Quantity> for RawQuantity {
    fn from(q: Quantity) -> Self {
        RawQuantity {
            item: q.item,
            amount: q.amount,
        }
    }
}

/// A tool an actor owns or has equipped
///
/// Quality is conventionally 1-100 with 50 as neutral. The range is not
/// enforced; [`ToolModifier`](crate::ToolModifier) clamps its effect instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolInstance {
    pub tag: ToolTag,
    pub quality: i32,
}

impl ToolInstance {
    /// Create a new tool instance
    pub fn new(tag: ToolTag, quality: i32) -> Self {
        Self { tag, quality }
    }

    /// Parse the tool tag and build the instance in one step
    pub fn of(tag: impl AsRef<str>, quality: i32) -> Result<Self> {
        Ok(Self::new(ToolTag::new(tag)?, quality))
    }
}
