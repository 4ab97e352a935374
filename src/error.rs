//! Error types for the memoization library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Memo Error Enum ==
/// Unified error type for memoization operations.
///
/// Computation failures are never wrapped here: a fallible computation's own
/// error type travels back to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoError {
    /// Arguments could not be serialized into a canonical key
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// A configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for MemoError {
    fn from(err: serde_json::Error) -> Self {
        MemoError::KeyDerivation(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for memoization operations.
pub type Result<T> = std::result::Result<T, MemoError>;
