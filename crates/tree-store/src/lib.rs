//! Tree Store Library
//!
//! An in-memory index over a flat list of tree-shaped records. Each record
//! carries its own id and the id of its parent; the store derives the
//! lookup tables needed to answer single-item, direct-children,
//! all-descendants and ancestor-chain queries without rescanning the input.
//!
//! # Core Concepts
//!
//! - **TreeItem**: a plain record (`id`, `parent`, optional `type` tag)
//! - **TreeRecord**: trait for indexing your own record types
//! - **TreeStore**: the immutable index and its queries
//! - **Root sentinel**: the parent value `"root"`, marking top-level records
//!
//! # Example
//!
//! ```
//! use tree_store::prelude::*;
//!
//! let store = TreeStore::new(vec![
//!     TreeItem::root(1),
//!     TreeItem::new(2, 1).with_kind("test"),
//!     TreeItem::new(3, 2),
//! ]);
//!
//! assert_eq!(store.get_children(&1.into()).len(), 1);
//! assert_eq!(store.get_all_children(&1.into()).len(), 2);
//! for ancestor in store.get_all_parents(&3.into()).unwrap() {
//!     println!("{}", ancestor.id);
//! }
//! ```

mod error;
mod index;
mod item;
mod options;
mod store;
mod traversal;
mod validate;

pub use error::{Result, TreeStoreError};
pub use item::{ItemId, ParentId, TreeItem, TreeRecord};
pub use options::{StoreOptions, Validation};
pub use store::TreeStore;
pub use traversal::{Ancestors, TraversalOrder, Walker};
pub use validate::{Issue, ValidationReport};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::{
        ItemId, ParentId, StoreOptions, TraversalOrder, TreeItem, TreeRecord, TreeStore,
        TreeStoreError, Validation,
    };
}
