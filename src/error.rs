//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache lookups.
///
/// Neither variant is fatal: the cache stays usable after any error and a
/// failed typed read leaves the entry in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Key found, but the stored value cannot be read as the requested type
    #[error("Type mismatch for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl CacheError {
    /// Returns true if this is a `KeyNotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::KeyNotFound(_))
    }

    /// Returns true if this is a `TypeMismatch` error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, CacheError::TypeMismatch { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
