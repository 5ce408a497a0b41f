//! Cache Entry Module
//!
//! Defines the node stored in the recency list.

use crate::cache::Value;

// == Cache Entry ==
/// A single cache entry and its position in recency order.
///
/// `prev` points toward the head (more recent), `next` toward the tail.
/// Both are slot indices into the owning list's arena, never owners.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: Value,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a detached entry.
    pub fn new(key: String, value: Value) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Returns true if the entry has no neighbours.
    #[allow(dead_code)]
    pub fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("k".to_string(), Value::from(7i32));

        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, Value::Int(7));
        assert!(entry.is_detached());
    }
}
