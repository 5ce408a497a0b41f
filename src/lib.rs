//! Typed LRU - A bounded in-process key/value cache
//!
//! Provides least-recently-used eviction with O(1) insert, lookup and
//! eviction, plus accessors that coerce stored values to concrete types.

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;

pub use cache::{CacheStats, LruCache, Value, DEFAULT_CAPACITY};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::CacheRegistry;
