//! Identifiers and records held by a [`TreeStore`](crate::TreeStore)

use derive_more::Display;
use std::num::ParseIntError;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a single record
///
/// Records may be keyed by integers or by strings. The two shapes never
/// compare equal to each other: `Int(7)` and `Str("7")` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ItemId {
    /// Numeric identifier
    #[display(fmt = "{}", _0)]
    Int(i64),
    /// Textual identifier
    #[display(fmt = "{}", _0)]
    Str(String),
}

impl ItemId {
    /// Returns the numeric value, if this is an integer id
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemId::Int(value) => Some(*value),
            ItemId::Str(_) => None,
        }
    }

    /// Returns the text, if this is a string id
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemId::Int(_) => None,
            ItemId::Str(value) => Some(value),
        }
    }

    /// Returns true if this id is the string reserved for the root sentinel
    pub fn is_root_sentinel(&self) -> bool {
        self.as_str() == Some(ParentId::ROOT_SENTINEL)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Int(value)
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        ItemId::Int(i64::from(value))
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Str(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Str(value)
    }
}

/// Parses an integer when the text is one, otherwise keeps it as a string id
impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: Result<i64, ParseIntError> = s.parse();
        Ok(match parsed {
            Ok(value) => ItemId::Int(value),
            Err(_) => ItemId::Str(s.to_string()),
        })
    }
}

/// Reference from a record to its parent
///
/// Converting from a raw string or [`ItemId`] maps the literal `"root"` to
/// [`ParentId::Root`]; everything else becomes [`ParentId::Item`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ItemId", into = "ItemId"))]
pub enum ParentId {
    /// The record sits at the top of the tree
    #[display(fmt = "root")]
    Root,
    /// The record hangs below the item with this id
    #[display(fmt = "{}", _0)]
    Item(ItemId),
}

impl ParentId {
    /// Raw value marking a top-level record
    pub const ROOT_SENTINEL: &'static str = "root";

    /// Returns true for the root sentinel
    pub fn is_root(&self) -> bool {
        matches!(self, ParentId::Root)
    }

    /// Returns the parent's item id, or `None` for the root sentinel
    pub fn item(&self) -> Option<&ItemId> {
        match self {
            ParentId::Root => None,
            ParentId::Item(id) => Some(id),
        }
    }
}

impl From<ItemId> for ParentId {
    fn from(id: ItemId) -> Self {
        if id.is_root_sentinel() {
            ParentId::Root
        } else {
            ParentId::Item(id)
        }
    }
}

impl From<ParentId> for ItemId {
    fn from(parent: ParentId) -> Self {
        match parent {
            ParentId::Root => ItemId::Str(ParentId::ROOT_SENTINEL.to_string()),
            ParentId::Item(id) => id,
        }
    }
}

impl From<i64> for ParentId {
    fn from(value: i64) -> Self {
        ParentId::Item(ItemId::Int(value))
    }
}

impl From<i32> for ParentId {
    fn from(value: i32) -> Self {
        ParentId::Item(ItemId::from(value))
    }
}

impl From<&str> for ParentId {
    fn from(value: &str) -> Self {
        ParentId::from(ItemId::from(value))
    }
}

impl From<String> for ParentId {
    fn from(value: String) -> Self {
        ParentId::from(ItemId::from(value))
    }
}

/// A record that can be indexed by a [`TreeStore`](crate::TreeStore)
///
/// Implement this for your own record type to index it directly instead of
/// converting to [`TreeItem`] first.
pub trait TreeRecord {
    /// The record's own id, expected to be unique across the input
    fn id(&self) -> &ItemId;

    /// The id of the record's parent, or the root sentinel
    fn parent(&self) -> &ParentId;
}

/// A plain tree record: id, parent reference and an optional type tag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeItem {
    /// Unique id of this record
    pub id: ItemId,
    /// Parent reference, [`ParentId::Root`] for top-level records
    pub parent: ParentId,
    /// Free-form classification tag; carries no structural meaning
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, skip_serializing_if = "Option::is_none")
    )]
    pub kind: Option<String>,
}

impl TreeItem {
    /// Create a new record without a type tag
    pub fn new(id: impl Into<ItemId>, parent: impl Into<ParentId>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            kind: None,
        }
    }

    /// Create a new top-level record
    pub fn root(id: impl Into<ItemId>) -> Self {
        Self::new(id, ParentId::Root)
    }

    /// Set the type tag
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl TreeRecord for TreeItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn parent(&self) -> &ParentId {
        &self.parent
    }
}

impl<R: TreeRecord + ?Sized> TreeRecord for Box<R> {
    fn id(&self) -> &ItemId {
        (**self).id()
    }

    fn parent(&self) -> &ParentId {
        (**self).parent()
    }
}
