//! Error types for the store wrappers
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the store wrappers.
///
/// Decode failures of stored bytes are deliberately absent: read paths that
/// decode values (`get_str`, `get_int`, `get_float`, replay) recover locally
/// by substituting a documented default instead of surfacing an error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing store is unreachable (connection down, lock poisoned)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Key holds the wrong kind of value for the requested operation
    #[error("Wrong value type for key: {0}")]
    WrongType(String),

    /// Underlying HTTP fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the store wrappers.
pub type Result<T> = std::result::Result<T, StoreError>;
