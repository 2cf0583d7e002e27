use std::collections::HashMap;

use crate::models::{LibraryEntry, LibraryStatus};

/// Library entries keyed by exact title.
///
/// Populated once per session, then only read.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: HashMap<String, LibraryEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A later entry with the same title replaces the
    /// earlier one.
    pub fn insert(&mut self, entry: LibraryEntry) {
        if let Some(previous) = self.entries.insert(entry.title.clone(), entry) {
            tracing::debug!(title = %previous.title, "Duplicate title, keeping the later entry");
        }
    }

    /// Exact, case-sensitive title lookup.
    pub fn lookup(&self, title: &str) -> Option<&LibraryEntry> {
        self.entries.get(title)
    }

    /// Every entry with the given status, sorted by title (byte order).
    pub fn entries_by_status(&self, status: LibraryStatus) -> Vec<&LibraryEntry> {
        let mut matching: Vec<&LibraryEntry> = self
            .entries
            .values()
            .filter(|e| e.status == status)
            .collect();
        matching.sort_unstable_by(|a, b| a.title.cmp(&b.title));
        matching
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.values()
    }
}

impl Extend<LibraryEntry> for EntryStore {
    fn extend<I: IntoIterator<Item = LibraryEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<LibraryEntry> for EntryStore {
    fn from_iter<I: IntoIterator<Item = LibraryEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
