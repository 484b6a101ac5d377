//! Configuration options for building a [`TreeStore`](crate::TreeStore).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much checking happens at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Validation {
    /// Index whatever is given, in linear time.
    Permissive,
    /// Reject duplicate ids, reserved ids, dangling parents and cycles.
    Strict,
}

impl Default for Validation {
    fn default() -> Self {
        Self::Permissive
    }
}

/// Options controlling how a store is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoreOptions {
    /// Checking performed on the input records.
    pub validation: Validation,
}

impl StoreOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation mode.
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Shorthand for strict validation.
    pub fn strict(self) -> Self {
        self.validation(Validation::Strict)
    }
}
