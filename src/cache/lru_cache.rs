//! Thread-safe LRU cache
//!
//! `LruCache` guards a `CacheStore` with a single mutex and adds the typed
//! accessors on top of `get`.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Value};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// A bounded, thread-safe key/value cache with LRU eviction.
///
/// Every operation, including reads, takes the same exclusive lock because a
/// successful `get` reorders the recency list. Values are cloned out before
/// the lock is released.
///
/// # Example
/// ```
/// use typed_lru::LruCache;
///
/// let cache = LruCache::new(2);
/// cache.set("a", 1i32);
/// cache.set("b", 2i32);
/// cache.get_int("a").unwrap(); // a is now most recently used
/// cache.set("c", 3i32);        // evicts b
/// assert!(cache.get("b").is_err());
/// ```
#[derive(Debug)]
pub struct LruCache {
    inner: Mutex<CacheStore>,
}

impl LruCache {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero falls back to `DEFAULT_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheStore::new(capacity)),
        }
    }

    /// Creates a cache sized from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::new(config.capacity)
    }

    // == Core Operations ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// Returns the entry evicted to make room, if any.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<(String, Value)> {
        self.inner.lock().set(key.into(), value.into())
    }

    /// Looks up `key`, promoting it to most recently used.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.inner.lock().get(key)
    }

    /// Looks up `key` without promoting it.
    pub fn peek(&self, key: &str) -> Result<Value> {
        self.inner.lock().peek(key)
    }

    /// Removes `key`, returning its value.
    pub fn delete(&self, key: &str) -> Result<Value> {
        self.inner.lock().delete(key)
    }

    /// Discards all entries.
    pub fn flush(&self) {
        self.inner.lock().flush();
    }

    /// Returns true if `key` is cached, without promoting it.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Snapshot of keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    /// Returns a snapshot of the hit, miss, eviction and flush counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    // == Typed Accessors ==
    /// Reads a boolean. Only values stored as `bool` qualify.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.typed(key, "bool", Value::as_bool)
    }

    /// Reads a signed integer of any stored width, truncated to `isize`.
    pub fn get_int(&self, key: &str) -> Result<isize> {
        self.get_int64(key).map(|v| v as isize)
    }

    /// Reads a signed integer truncated to `i8`.
    pub fn get_int8(&self, key: &str) -> Result<i8> {
        self.get_int64(key).map(|v| v as i8)
    }

    /// Reads a signed integer truncated to `i16`.
    pub fn get_int16(&self, key: &str) -> Result<i16> {
        self.get_int64(key).map(|v| v as i16)
    }

    /// Reads a signed integer truncated to `i32`.
    pub fn get_int32(&self, key: &str) -> Result<i32> {
        self.get_int64(key).map(|v| v as i32)
    }

    /// Reads a signed integer. Only values stored as signed integers qualify.
    pub fn get_int64(&self, key: &str) -> Result<i64> {
        self.typed(key, "int", Value::as_i64)
    }

    /// Reads an unsigned integer, truncated to `usize`.
    ///
    /// Signed values are reinterpreted bit for bit: a stored `-1` reads as
    /// `usize::MAX`.
    pub fn get_uint(&self, key: &str) -> Result<usize> {
        self.get_uint64(key).map(|v| v as usize)
    }

    /// Reads an unsigned integer truncated to `u8`.
    pub fn get_uint8(&self, key: &str) -> Result<u8> {
        self.get_uint64(key).map(|v| v as u8)
    }

    /// Reads an unsigned integer truncated to `u16`.
    pub fn get_uint16(&self, key: &str) -> Result<u16> {
        self.get_uint64(key).map(|v| v as u16)
    }

    /// Reads an unsigned integer truncated to `u32`.
    pub fn get_uint32(&self, key: &str) -> Result<u32> {
        self.get_uint64(key).map(|v| v as u32)
    }

    /// Reads an unsigned integer, reinterpreting signed values bit for bit.
    pub fn get_uint64(&self, key: &str) -> Result<u64> {
        self.typed(key, "uint", Value::as_u64)
    }

    /// Reads a string. Only values stored as strings qualify.
    pub fn get_str(&self, key: &str) -> Result<String> {
        self.typed(key, "string", |v| v.as_str().map(str::to_owned))
    }

    /// Reads an opaque payload of type `T`.
    pub fn get_opaque<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        self.typed(key, std::any::type_name::<T>(), Value::downcast::<T>)
    }

    // Runs `get` (and its promotion), then coerces outside the lock.
    fn typed<T>(
        &self,
        key: &str,
        expected: &'static str,
        coerce: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T> {
        let value = self.get(key)?;
        coerce(&value).ok_or_else(|| CacheError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: value.type_name(),
        })
    }

    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        self.inner.lock().validate_invariants();
    }
}

impl Default for LruCache {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}
