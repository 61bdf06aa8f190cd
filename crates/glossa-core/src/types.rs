use std::time::SystemTime;

use glossa_provider::{LanguageCode, WordDetail};
use uuid::Uuid;

/// Provider lookup key for a single word or a multi-word phrase.
///
/// Two keys are equal iff term, source and target all match, regardless of
/// whether the term came from a click or a drag selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub term: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
}

/// One saved vocabulary entry
#[derive(Debug, Clone)]
pub struct SavedEntry {
    pub id: Uuid,
    pub term: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
    pub detail: WordDetail,
    pub saved_at: SystemTime,
}
