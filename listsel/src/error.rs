//! Error types for selection operations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors returned by selection models.
///
/// Every error leaves the model exactly as it was before the call, and no
/// change notification is emitted for a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// An index outside `[0, length)` was passed to a mutating operation.
    #[error("index {index} out of range for list of length {length}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The model length at the time of the call.
        length: usize,
    },

    /// A permutation does not cover exactly the current list.
    #[error("permutation has {actual} entries, expected {expected}")]
    PermutationLength {
        /// The model length.
        expected: usize,
        /// Number of entries in the permutation.
        actual: usize,
    },

    /// A permutation maps an index past the explicitly supplied new length.
    #[error("permutation maps {index} to {target}, past new length {length}")]
    PermutationTarget {
        /// Old index.
        index: usize,
        /// New index it maps to.
        target: usize,
        /// The new length supplied by the caller.
        length: usize,
    },

    /// A permutation target leaves no room for a derived new length.
    #[error("permutation maps {index} to {target}, beyond any list length")]
    PermutationOverflow {
        /// Old index.
        index: usize,
        /// New index it maps to.
        target: usize,
    },

    /// A raw permutation entry is negative but not the removal marker `-1`.
    #[error("invalid permutation entry {value} at {index}")]
    InvalidPermutationEntry {
        /// Position in the raw array.
        index: usize,
        /// The offending value.
        value: i64,
    },
}
