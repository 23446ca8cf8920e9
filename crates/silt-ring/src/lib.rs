//! Silt Ring - Bounded buffer for recent change history
//!
//! This crate provides the default `ChangeLog` implementation used by
//! stores: a fixed-capacity FIFO of history entries.
//!
//! # Features
//!
//! - **Bounded memory**: fixed capacity, no unbounded growth
//! - **O(1) insertion**: appending evicts the oldest entry when full
//! - **Live resizing**: shrinking the capacity evicts immediately
//!
//! # Example
//!
//! ```rust
//! use silt_core::{ChangeLog, HistoryEntry, Modifier};
//! use silt_ring::ChangeRing;
//!
//! let mut ring = ChangeRing::new(3);
//! for i in 0..4 {
//!     ring.record(HistoryEntry::manual(Modifier::new().set("n", i)));
//! }
//!
//! // The first entry has been evicted
//! assert_eq!(ring.len(), 3);
//! ```

use silt_core::{ChangeLog, HistoryEntry};
use std::collections::VecDeque;

/// Default number of entries a ring retains
pub const DEFAULT_CAPACITY: usize = 10;

/// A bounded FIFO of committed changes
///
/// Entries are ordered oldest first; recording at capacity evicts the
/// oldest entry.
#[derive(Debug, Clone)]
pub struct ChangeRing {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ChangeRing {
    /// Create a new ring with the given capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Iterate over stored entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recently recorded entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    fn evict_to_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

impl Default for ChangeRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChangeLog for ChangeRing {
    fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        self.evict_to_capacity();
    }

    fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: usize) {
        assert!(capacity > 0, "Capacity must be greater than 0");
        self.capacity = capacity;
        self.evict_to_capacity();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silt_core::{Modifier, Value};

    fn numbered(n: i64) -> HistoryEntry {
        HistoryEntry::manual(Modifier::new().set("n", n))
    }

    fn recorded_numbers(ring: &ChangeRing) -> Vec<i64> {
        ring.entries()
            .iter()
            .map(|e| e.changes.data.get("n").and_then(Value::as_int).unwrap())
            .collect()
    }

    #[test]
    fn test_record_within_capacity() {
        let mut ring = ChangeRing::new(3);
        ring.record(numbered(1));
        ring.record(numbered(2));

        assert_eq!(ring.len(), 2);
        assert_eq!(recorded_numbers(&ring), vec![1, 2]);
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut ring = ChangeRing::new(3);
        for n in 1..=5 {
            ring.record(numbered(n));
        }

        assert_eq!(ring.len(), 3);
        assert_eq!(recorded_numbers(&ring), vec![3, 4, 5]);
    }

    #[test]
    fn test_shrink_evicts_oldest_immediately() {
        let mut ring = ChangeRing::new(5);
        for n in 1..=5 {
            ring.record(numbered(n));
        }

        ring.set_capacity(2);
        assert_eq!(recorded_numbers(&ring), vec![4, 5]);

        // Growing back does not resurrect anything
        ring.set_capacity(5);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_latest_and_clear() {
        let mut ring = ChangeRing::default();
        assert_eq!(ring.capacity(), DEFAULT_CAPACITY);
        assert!(ring.latest().is_none());

        ring.record(numbered(1));
        ring.record(numbered(2));
        assert_eq!(
            ring.latest()
                .and_then(|e| e.changes.data.get("n"))
                .and_then(Value::as_int),
            Some(2)
        );

        ring.clear();
        assert!(ring.is_empty());
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than 0")]
    fn test_zero_capacity_rejected() {
        ChangeRing::new(0);
    }
}
