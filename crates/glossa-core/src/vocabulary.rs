use glossa_provider::LanguageCode;

use crate::types::SavedEntry;

/// De-duplicated collection of saved lookups, in insertion order.
///
/// At most one entry exists per `(term, source)` pair; saving a duplicate is a
/// strict no-op rather than an update.
#[derive(Debug, Default)]
pub struct VocabularyStore {
    entries: Vec<SavedEntry>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` unless its `(term, source)` pair is already present.
    /// Returns whether the entry was inserted.
    pub fn save(&mut self, entry: SavedEntry) -> bool {
        if self.contains(&entry.term, &entry.source) {
            tracing::debug!("'{}' ({}) already saved, ignoring", entry.term, entry.source);
            return false;
        }

        self.entries.push(entry);
        true
    }

    /// Remove the matching entry if present. Returns whether one was removed.
    pub fn remove(&mut self, term: &str, source: &LanguageCode) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.term == term && &e.source == source));
        self.entries.len() != before
    }

    pub fn contains(&self, term: &str, source: &LanguageCode) -> bool {
        self.entries
            .iter()
            .any(|e| e.term == term && &e.source == source)
    }

    pub fn list(&self) -> &[SavedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
