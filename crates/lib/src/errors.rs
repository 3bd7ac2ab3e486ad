//! Error types for keyed list operations.
//!
//! Lookups by key never fail: they return `Option`. Errors are reserved for
//! mutations that would break a list's structural guarantees (sorted order,
//! key uniqueness, positional bounds) and for accessors that need a
//! non-empty list or a present key.

use thiserror::Error;

/// Errors that can occur while reading or mutating a keyed list.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyedListError {
    /// A distinct element with the same key is already in the list
    #[error("Element with same key already exists in list at index {index}")]
    DuplicateKey {
        /// Index of the element already holding the key
        index: usize,
    },

    /// The caller asserted an index that sorted order does not allow
    #[error("Wrong index {index} given for element, sorted order places it at {expected}")]
    IndexMismatch {
        /// Index given by the caller
        index: usize,
        /// Insertion point computed from the element's key
        expected: usize,
    },

    /// Positional access outside the list
    #[error("Index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// `first_key` / `last_key` on an empty list
    #[error("List is empty")]
    EmptyCollection,

    /// A key the caller required is not present
    #[error("Key not found in list: {key}")]
    KeyNotFound {
        /// Debug rendering of the missing key
        key: String,
    },

    /// A bulk insertion stopped at its first failure
    ///
    /// Elements inserted before the failure remain in the list.
    #[error("Bulk insertion stopped after {applied} element(s): {source}")]
    BulkAddInterrupted {
        /// Number of elements inserted before the failure
        applied: usize,
        /// The failure that stopped the insertion
        #[source]
        source: Box<KeyedListError>,
    },
}

impl KeyedListError {
    /// The underlying error, looking through bulk-insertion wrappers.
    pub fn root_cause(&self) -> &KeyedListError {
        match self {
            KeyedListError::BulkAddInterrupted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Number of elements a bulk insertion applied before failing.
    pub fn applied(&self) -> Option<usize> {
        match self {
            KeyedListError::BulkAddInterrupted { applied, .. } => Some(*applied),
            _ => None,
        }
    }

    /// Check if this error was caused by a duplicate key
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self.root_cause(), KeyedListError::DuplicateKey { .. })
    }

    /// Check if this error was caused by a wrong caller-supplied index
    pub fn is_index_mismatch(&self) -> bool {
        matches!(self.root_cause(), KeyedListError::IndexMismatch { .. })
    }

    /// Check if this error is positional (mismatch or out of bounds)
    pub fn is_index_error(&self) -> bool {
        matches!(
            self.root_cause(),
            KeyedListError::IndexMismatch { .. } | KeyedListError::IndexOutOfBounds { .. }
        )
    }

    /// Check if this error indicates an empty list
    pub fn is_empty_collection(&self) -> bool {
        matches!(self, KeyedListError::EmptyCollection)
    }

    /// Check if this error indicates a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeyedListError::KeyNotFound { .. })
    }

    /// Check if this error comes from an interrupted bulk insertion
    pub fn is_bulk_error(&self) -> bool {
        matches!(self, KeyedListError::BulkAddInterrupted { .. })
    }
}
