//! Cache Store Module
//!
//! Unsynchronized cache engine combining a HashMap index with the recency
//! list. `LruCache` wraps it in a lock for shared use.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheStats, RecencyList, Value, DEFAULT_CAPACITY};
use crate::config::normalize_capacity;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Fixed-capacity storage with LRU eviction.
#[derive(Debug)]
pub(crate) struct CacheStore {
    /// Key to slot index in `lru`
    index: HashMap<String, usize>,
    /// Entries in recency order
    lru: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; zero selects `DEFAULT_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let capacity = normalize_capacity(capacity);
        // Storage grows on demand; the up-front reservation is bounded
        let reserve = capacity.min(DEFAULT_CAPACITY);
        Self {
            index: HashMap::with_capacity(reserve),
            lru: RecencyList::with_capacity(reserve),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Set ==
    /// Stores a key-value pair and makes it the most recently used entry.
    ///
    /// If the key already exists, its value is replaced in place.
    /// If the cache is at capacity, the least recently used entry is evicted
    /// first and returned.
    pub fn set(&mut self, key: String, value: Value) -> Option<(String, Value)> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.lru.get_mut(idx) {
                entry.value = value;
            }
            self.lru.move_to_front(idx);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let idx = self.lru.push_front(key.clone(), value);
        self.index.insert(key, idx);
        self.stats.set_total_entries(self.index.len());

        evicted
    }

    // == Get ==
    /// Retrieves a value by key, promoting it to most recently used.
    pub fn get(&mut self, key: &str) -> Result<Value> {
        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::KeyNotFound(key.to_string()));
        };

        self.lru.move_to_front(idx);
        self.stats.record_hit();
        self.lru
            .get(idx)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))
    }

    // == Peek ==
    /// Retrieves a value without changing recency or statistics.
    pub fn peek(&self, key: &str) -> Result<Value> {
        self.index
            .get(key)
            .and_then(|&idx| self.lru.get(idx))
            .map(|entry| entry.value.clone())
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))
    }

    // == Delete ==
    /// Removes an entry by key and returns its value.
    pub fn delete(&mut self, key: &str) -> Result<Value> {
        let idx = self
            .index
            .remove(key)
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))?;
        let entry = self
            .lru
            .remove(idx)
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))?;
        self.stats.set_total_entries(self.index.len());
        Ok(entry.value)
    }

    // == Flush ==
    /// Discards every entry.
    pub fn flush(&mut self) {
        let dropped = self.index.len();
        self.index.clear();
        self.lru.clear();
        self.stats.record_flush();
        self.stats.set_total_entries(0);
        debug!(dropped, "flushed cache");
    }

    /// Returns true if `key` is cached. Does not promote.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.lru.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Removes the tail from both the list and the index.
    fn evict_oldest(&mut self) -> Option<(String, Value)> {
        let entry = self.lru.pop_back()?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();
        debug!(key = %entry.key, "evicted least recently used entry");
        Some((entry.key, entry.value))
    }

    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        self.lru.validate_invariants();
        assert_eq!(self.index.len(), self.lru.len(), "index/list size mismatch");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");
        for (key, &idx) in &self.index {
            let entry = self.lru.get(idx).expect("index points at a free slot");
            assert_eq!(&entry.key, key, "index points at the wrong entry");
        }
    }
}
