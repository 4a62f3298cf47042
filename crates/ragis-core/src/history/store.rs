//! Pure collection operations for the bounded history store.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::model::HistoryEntry;

/// Maximum number of saved conversations; oldest beyond this are evicted
/// on insert.
pub const HISTORY_CAPACITY: usize = 20;

/// Entries older than this are purged on load.
pub const MAX_AGE_HOURS: i64 = 48;

/// Ordered collection of saved conversations, most recent first.
///
/// Positional most-recent-first ordering is maintained by prepend-on-insert;
/// an in-place replace does not move the entry. Display re-sorts by save
/// time explicitly via [`sorted_for_display`](Self::sorted_for_display).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a saved conversation by its session id.
    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Inserts or replaces the entry with the same id.
    ///
    /// A replace keeps the entry's position; a new entry is prepended and
    /// the collection is truncated to [`HISTORY_CAPACITY`]. Calling this
    /// twice with an identical entry yields the same store as calling it
    /// once.
    pub fn upsert(&mut self, entry: HistoryEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => {
                self.entries.insert(0, entry);
                self.entries.truncate(HISTORY_CAPACITY);
            }
        }
    }

    /// Removes the entry with the given id. A miss is a no-op.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drops entries saved more than [`MAX_AGE_HOURS`] before `now`.
    /// Returns how many were dropped so callers can persist the sweep.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::hours(MAX_AGE_HOURS);
        let before = self.entries.len();
        self.entries.retain(|e| e.created_at >= cutoff);
        before - self.entries.len()
    }

    /// Entries re-sorted by save time, most recent first, for display.
    pub fn sorted_for_display(&self) -> Vec<&HistoryEntry> {
        let mut sorted: Vec<&HistoryEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }
}
