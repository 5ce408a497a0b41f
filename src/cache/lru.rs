//! Recency List Module
//!
//! Arena-backed doubly linked list giving O(1) insert, promotion and
//! eviction for the LRU policy.

use tracing::trace;

use crate::cache::{CacheEntry, Value};

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Nodes live in `slots`; links between them are slot indices. Freed slots
/// are recycled through `free` so indices handed out stay stable for the
/// lifetime of their entry.
///
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug, Default)]
pub(crate) struct RecencyList {
    slots: Vec<Option<CacheEntry>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty list.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot index of the most recently used entry.
    #[allow(dead_code)]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Slot index of the least recently used entry.
    #[allow(dead_code)]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub fn get(&self, idx: usize) -> Option<&CacheEntry> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut CacheEntry> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    // == Push Front ==
    /// Inserts a new entry at the head and returns its slot index.
    pub fn push_front(&mut self, key: String, value: Value) -> usize {
        let mut entry = CacheEntry::new(key, value);
        entry.next = self.head;

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => {
                if let Some(node) = self.get_mut(old_head) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;

        trace!(slot = idx, "pushed entry at head");
        idx
    }

    // == Move To Front ==
    /// Promotes an entry to most recently used.
    ///
    /// Returns false if `idx` is not a live slot.
    pub fn move_to_front(&mut self, idx: usize) -> bool {
        if self.get(idx).is_none() {
            return false;
        }
        if self.head == Some(idx) {
            return true;
        }

        self.detach(idx);
        self.attach_front(idx);
        trace!(slot = idx, "promoted entry to head");
        true
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<CacheEntry> {
        let idx = self.tail?;
        self.remove(idx)
    }

    // == Remove ==
    /// Unlinks an entry and frees its slot.
    pub fn remove(&mut self, idx: usize) -> Option<CacheEntry> {
        self.get(idx)?;
        self.detach(idx);

        let entry = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    // Links prev <-> next around `idx`, fixing head/tail at the ends.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.get_mut(idx) {
            Some(node) => {
                let links = (node.prev, node.next);
                node.prev = None;
                node.next = None;
                links
            }
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.get_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.get_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.get_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.get_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Walks the list both ways and panics if any link is inconsistent.
    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cur = self.head;
        while let Some(idx) = cur {
            let node = self.get(idx).expect("dangling link");
            assert_eq!(node.prev, prev, "broken prev link at slot {idx}");
            assert!(forward.len() < self.len, "cycle detected");
            forward.push(idx);
            prev = Some(idx);
            cur = node.next;
        }
        assert_eq!(self.tail, prev, "tail does not end the forward walk");
        assert_eq!(forward.len(), self.len, "len does not match reachable nodes");

        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.len, "unreachable live slots");
    }
}

// == Iterator ==
/// Iterator over entries in recency order (MRU first).
pub(crate) struct Iter<'a> {
    list: &'a RecencyList,
    current: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.current?)?;
        self.current = entry.next;
        Some(entry)
    }
}
