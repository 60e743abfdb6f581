//! The visible, append-only history log.

use crate::HistoryEntry;

/// Ordered history entries, oldest first.
///
/// Local results are appended at the end; a server load replaces the whole
/// log with the server's entries sorted the same way. Entries themselves
/// are never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns a reference to it.
    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Replaces the log with `entries`, sorted chronologically ascending.
    ///
    /// The sort is stable, so entries sharing a timestamp keep the order
    /// they arrived in.
    pub fn replace(&mut self, mut entries: Vec<HistoryEntry>) {
        entries.sort_by_key(HistoryEntry::at);
        self.entries = entries;
    }

    /// Drops every entry (the session view was torn down).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
