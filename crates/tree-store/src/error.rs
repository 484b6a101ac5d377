use derive_more::Display;

use crate::item::ItemId;
use crate::validate::ValidationReport;

/// Errors returned by [`TreeStore`](crate::TreeStore) queries
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TreeStoreError {
    /// No record with this id was indexed
    #[display(fmt = "item {} not found", _0)]
    NotFound(ItemId),

    /// Walking up from this item never reached the root sentinel
    #[display(fmt = "parent chain of item {} does not reach the root", _0)]
    Cycle(ItemId),

    /// Strict construction rejected the input
    #[display(fmt = "malformed input: {}", _0)]
    Malformed(ValidationReport),
}

impl std::error::Error for TreeStoreError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TreeStoreError>;
