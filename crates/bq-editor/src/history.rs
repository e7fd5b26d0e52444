//! Bounded, linear undo/redo log of arrangement snapshots.
//!
//! Entries are immutable deep copies of the item list, committed only on
//! discrete actions (never per pointer-move). The log is strictly linear:
//! committing after an undo discards the redo tail. Above the cap the
//! oldest entry is evicted, so exhaustion never surfaces as an error.

use bq_core::model::Item;
use std::time::Instant;

/// Default maximum number of retained entries.
pub const DEFAULT_HISTORY_CAP: usize = 30;

/// One committed checkpoint: a deep copy of the item list plus the
/// monotonic commit time.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    items: Vec<Item>,
    committed_at: Instant,
}

impl HistoryEntry {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn committed_at(&self) -> Instant {
        self.committed_at
    }
}

/// Linear snapshot sequence with a cursor pointing at the current state.
#[derive(Debug)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    /// Index of the entry matching the live arrangement.
    cursor: usize,
    cap: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl HistoryManager {
    /// A new history seeded with one entry for the given initial state, so
    /// the first undo can return to it. `cap` is clamped to at least 1.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                items: Vec::new(),
                committed_at: Instant::now(),
            }],
            cursor: 0,
            cap: cap.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Record a checkpoint: drop any redo tail, append, advance the
    /// cursor, and evict the oldest entry when over the cap.
    pub fn commit(&mut self, items: Vec<Item>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            items,
            committed_at: Instant::now(),
        });
        self.cursor += 1;

        if self.entries.len() > self.cap {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one checkpoint. No-op at the start of history.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one checkpoint. No-op at the end of history.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// The entry the live arrangement currently matches.
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }
}
