//! Configuration Module
//!
//! Construction parameters for caches and registries, with an opt-in loader
//! for environment variables.

use std::env;

use crate::cache::DEFAULT_CAPACITY;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries a cache can hold
    pub capacity: usize,
}

impl Config {
    /// Creates a Config with the given capacity.
    ///
    /// A capacity of zero falls back to `DEFAULT_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: normalize_capacity(capacity),
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 1024)
    ///
    /// Missing, unparsable or non-positive values use the default.
    pub fn from_env() -> Self {
        let capacity = env::var("LRU_CAPACITY")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|&v| v > 0)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(DEFAULT_CAPACITY);

        Self { capacity }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Maps the non-positive capacity to the default.
pub(crate) fn normalize_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        DEFAULT_CAPACITY
    } else {
        capacity
    }
}
