//! Cache Registry Module
//!
//! An explicit collection of named caches, shared by handing the registry
//! (or an `Arc` of it) to whoever needs a cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::cache::LruCache;
use crate::config::Config;

// == Cache Registry ==
/// Maps names to shared caches.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    caches: RwLock<HashMap<String, Arc<LruCache>>>,
    config: Config,
}

impl CacheRegistry {
    /// Creates an empty registry whose new caches use `config`.
    pub fn new(config: Config) -> Self {
        Self {
            caches: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the cache registered under `name`, creating it with the
    /// configured capacity if needed.
    pub fn get_or_create(&self, name: &str) -> Arc<LruCache> {
        self.get_or_create_with_capacity(name, self.config.capacity)
    }

    /// Like `get_or_create`, with an explicit capacity for a new cache.
    ///
    /// An existing cache is returned as is; `capacity` is ignored for it.
    pub fn get_or_create_with_capacity(&self, name: &str, capacity: usize) -> Arc<LruCache> {
        if let Some(cache) = self.caches.read().get(name) {
            return Arc::clone(cache);
        }

        let mut caches = self.caches.write();
        // Another caller may have created it between the two locks
        let cache = caches.entry(name.to_string()).or_insert_with(|| {
            let cache = LruCache::new(capacity);
            info!(name, capacity = cache.capacity(), "created cache");
            Arc::new(cache)
        });
        Arc::clone(cache)
    }

    pub fn get(&self, name: &str) -> Option<Arc<LruCache>> {
        self.caches.read().get(name).cloned()
    }

    /// Unregisters a cache. Holders of the `Arc` keep a working cache.
    pub fn remove(&self, name: &str) -> Option<Arc<LruCache>> {
        let removed = self.caches.write().remove(name);
        if removed.is_some() {
            info!(name, "removed cache");
        }
        removed
    }

    /// Flushes every registered cache.
    pub fn flush_all(&self) {
        for cache in self.caches.read().values() {
            cache.flush();
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }
}
