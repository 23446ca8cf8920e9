//! Change history types
//!
//! `silt-core` defines the record shape and the storage trait; storage
//! strategy lives in sibling crates (`silt-ring` provides the bounded FIFO
//! buffer stores use by default).

use crate::{Action, Modifier};
use serde::{Deserialize, Serialize};

/// Record of one committed modifier and the action that caused it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The dispatched action, or `None` for direct `update`/`clear`/cache
    /// commits
    pub action: Option<Action>,
    /// The modifier that was committed
    pub changes: Modifier,
}

impl HistoryEntry {
    /// Record a commit produced by a dispatched action
    pub fn dispatched(action: Action, changes: Modifier) -> Self {
        Self {
            action: Some(action),
            changes,
        }
    }

    /// Record a commit with no originating action
    pub fn manual(changes: Modifier) -> Self {
        Self {
            action: None,
            changes,
        }
    }
}

/// Trait for storing recent committed changes.
///
/// Implementations choose the storage strategy: a bounded ring for live
/// stores, or a growing vector when a full audit trail is wanted.
pub trait ChangeLog {
    /// Append an entry, evicting the oldest if the log is at capacity
    fn record(&mut self, entry: HistoryEntry);

    /// All stored entries, oldest first
    fn entries(&self) -> Vec<HistoryEntry>;

    /// Maximum number of entries retained
    fn capacity(&self) -> usize;

    /// Change the retention bound; shrinking evicts oldest entries
    /// immediately
    fn set_capacity(&mut self, capacity: usize);

    /// Number of entries currently stored
    fn len(&self) -> usize;

    /// Check if the log is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all stored entries
    fn clear(&mut self);
}
