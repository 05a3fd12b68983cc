//! Error type shared by every table operation.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by [`ByteTable`](crate::ByteTable) operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TableError {
    /// Caller error: zero capacity, zero load factor, over-long key, ...
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input.
        message: String,
    },

    /// `set` without replace on a key that is already present.
    #[error("key already exists")]
    KeyExists,

    /// The key is not present in the table.
    #[error("key not found")]
    NotFound,

    /// The allocator refused a slot array or key copy.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Growth would exceed the configured (or addressable) slot count.
    #[error("capacity exceeded: requested {requested:?} slots, max {max}")]
    CapacityExceeded {
        /// Slot count growth asked for, if it was representable.
        requested: Option<usize>,
        /// Configured ceiling.
        max: usize,
    },
}

impl TableError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TableError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
