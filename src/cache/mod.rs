//! Cache Module
//!
//! Provides the bounded in-memory cache with LRU eviction.

mod entry;
mod lru;
mod lru_cache;
mod stats;
mod store;
mod value;


// Re-export public types
pub use lru_cache::LruCache;
pub use stats::CacheStats;
pub use value::Value;

pub(crate) use entry::CacheEntry;
pub(crate) use lru::RecencyList;
pub(crate) use store::CacheStore;

// == Public Constants ==
/// Capacity used when a cache is created with a capacity of zero.
pub const DEFAULT_CAPACITY: usize = 1024;
