use std::sync::Arc;
use std::time::{Duration, SystemTime};

use glossa_provider::{LanguageCode, LexicalProvider, SpeechSynthesizer};
use uuid::Uuid;

use crate::detect::LanguageDetector;
use crate::lookup::{LookupCoordinator, LookupState};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::segment::{self, TextPart};
use crate::selection::{self, PhraseResolution, SelectionSpan};
use crate::types::{LookupKey, SavedEntry};
use crate::vocabulary::VocabularyStore;

pub struct SessionOptions {
    pub default_source: LanguageCode,
    pub target: LanguageCode,
    pub detection_enabled: bool,
    pub detect_quiet: Duration,
    pub lookup_timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_source: "en".to_string(),
            target: "en".to_string(),
            detection_enabled: true,
            detect_quiet: Duration::from_millis(500),
            lookup_timeout: None,
        }
    }
}

/// Owns every piece of mutable session state: the part sequence, the active
/// lookup, the detection state and the saved vocabulary. All mutation goes
/// through its operations; there are no ambient globals.
pub struct Session<L, S> {
    parts: Vec<TextPart>,
    coordinator: Arc<LookupCoordinator<L, S>>,
    detector: Arc<LanguageDetector<L>>,
    vocabulary: VocabularyStore,
    preprocessor: DefaultPreprocessor,
    default_source: LanguageCode,
    target: LanguageCode,
    detection_enabled: bool,
}

impl<L, S> Session<L, S>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    pub fn new(lexical: Arc<L>, speech: Arc<S>, options: SessionOptions) -> Self {
        Self {
            parts: Vec::new(),
            coordinator: Arc::new(LookupCoordinator::new(
                Arc::clone(&lexical),
                speech,
                options.lookup_timeout,
            )),
            detector: Arc::new(LanguageDetector::new(lexical, options.detect_quiet)),
            vocabulary: VocabularyStore::new(),
            preprocessor: DefaultPreprocessor,
            default_source: options.default_source,
            target: options.target,
            detection_enabled: options.detection_enabled,
        }
    }

    /// Replace the session text: preprocess, re-segment (invalidating all
    /// previously held part indices) and reschedule language detection.
    pub async fn set_text(&mut self, raw: &str) -> &[TextPart] {
        let text = self.preprocessor.process(raw);
        self.parts = segment::segment(&text);
        tracing::debug!("segmented into {} parts", self.parts.len());

        if self.detection_enabled {
            self.detector.text_changed(&text).await;
        }

        &self.parts
    }

    pub fn parts(&self) -> &[TextPart] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&TextPart> {
        self.parts.get(index)
    }

    pub fn resolve_selection(&self, span: SelectionSpan) -> PhraseResolution {
        selection::resolve(span, &self.parts)
    }

    /// Source language for new lookups: the detected language, or the
    /// configured default while detection has no answer.
    pub async fn effective_source(&self) -> LanguageCode {
        self.detector
            .state()
            .await
            .language
            .unwrap_or_else(|| self.default_source.clone())
    }

    pub async fn key_for(&self, resolution: &PhraseResolution) -> Option<LookupKey> {
        let term = resolution.term()?;
        Some(LookupKey {
            term,
            source: self.effective_source().await,
            target: self.target.clone(),
        })
    }

    /// Lookup key for a click on one part; `None` for non-word parts.
    pub async fn key_for_click(&self, index: usize) -> Option<LookupKey> {
        let term = self.part(index)?.normalized.clone()?;
        Some(LookupKey {
            term,
            source: self.effective_source().await,
            target: self.target.clone(),
        })
    }

    pub fn coordinator(&self) -> Arc<LookupCoordinator<L, S>> {
        Arc::clone(&self.coordinator)
    }

    pub fn detector(&self) -> Arc<LanguageDetector<L>> {
        Arc::clone(&self.detector)
    }

    /// Save the currently resolved lookup into the vocabulary.
    ///
    /// Returns the new entry id, or `None` when nothing is resolved or the
    /// `(term, source)` pair is already saved.
    pub async fn save_current(&mut self) -> Option<Uuid> {
        let key = self.coordinator.active_key().await?;
        let LookupState::Resolved(detail) = self.coordinator.state().await else {
            tracing::debug!("nothing resolved to save");
            return None;
        };

        let entry = SavedEntry {
            id: Uuid::new_v4(),
            term: key.term,
            source: key.source,
            target: key.target,
            detail,
            saved_at: SystemTime::now(),
        };
        let id = entry.id;

        self.vocabulary.save(entry).then_some(id)
    }

    pub fn remove_saved(&mut self, term: &str, source: &LanguageCode) -> bool {
        self.vocabulary.remove(term, source)
    }

    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use glossa_provider::{
        ProviderError, ProviderMetadata, SpeechError, WordDetail,
    };

    use crate::lookup::LookupOutcome;

    use super::*;

    struct StubLexical {
        detected: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl LexicalProvider for StubLexical {
        async fn term_details(
            &self,
            term: &str,
            _source: LanguageCode,
            _target: LanguageCode,
        ) -> Result<Option<WordDetail>, ProviderError> {
            Ok(Some(WordDetail {
                definition: format!("definition of {term}"),
                example_sentences: vec![format!("Example with {term}.")],
                ..WordDetail::default()
            }))
        }

        async fn detect_language(
            &self,
            _text: &str,
        ) -> Result<Option<LanguageCode>, ProviderError> {
            Ok(self.detected.map(str::to_string))
        }

        fn supported_languages(&self) -> Vec<LanguageCode> {
            vec!["en".to_string(), "de".to_string()]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "stub".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    struct SilentSpeech;

    #[async_trait::async_trait]
    impl SpeechSynthesizer for SilentSpeech {
        async fn synthesize(&self, _term: &str) -> Result<Option<Vec<u8>>, SpeechError> {
            Ok(None)
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "silent".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    fn session(detected: Option<&'static str>) -> Session<StubLexical, SilentSpeech> {
        Session::new(
            Arc::new(StubLexical { detected }),
            Arc::new(SilentSpeech),
            SessionOptions {
                default_source: "en".to_string(),
                target: "de".to_string(),
                detect_quiet: Duration::from_millis(20),
                ..SessionOptions::default()
            },
        )
    }

    #[tokio::test]
    async fn set_text_replaces_the_part_sequence() {
        let mut session = session(None);

        session.set_text("the quick fox").await;
        assert_eq!(session.parts().len(), 5);

        session.set_text("hi").await;
        assert_eq!(session.parts().len(), 1);
        assert!(session.part(4).is_none());
    }

    #[tokio::test]
    async fn click_key_falls_back_to_default_source() {
        let mut session = session(None);
        session.set_text("Guten Tag").await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let key = session.key_for_click(0).await.expect("word part");
        assert_eq!(key.term, "guten");
        assert_eq!(key.source, "en");
        assert_eq!(key.target, "de");
    }

    #[tokio::test]
    async fn detected_language_feeds_new_keys() {
        let mut session = session(Some("de"));
        session.set_text("Guten Tag").await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let key = session.key_for_click(0).await.expect("word part");
        assert_eq!(key.source, "de");
    }

    #[tokio::test]
    async fn click_on_non_word_part_has_no_key() {
        let mut session = session(None);
        session.set_text("the quick fox").await;

        assert!(session.key_for_click(1).await.is_none());
        assert!(session.key_for_click(99).await.is_none());
    }

    #[tokio::test]
    async fn selection_resolution_builds_phrase_keys() {
        let mut session = session(None);
        session.set_text("The Quick Fox").await;

        let resolution = session.resolve_selection(SelectionSpan::new(0, 4));
        let key = session.key_for(&resolution).await.expect("phrase key");
        assert_eq!(key.term, "the quick fox");
    }

    #[tokio::test]
    async fn save_current_is_idempotent_per_term_and_source() {
        let mut session = session(None);
        session.set_text("fox").await;

        let key = session.key_for_click(0).await.expect("word part");
        let outcome = session.coordinator().lookup(key).await;
        assert!(matches!(outcome, LookupOutcome::Resolved(_)));

        assert!(session.save_current().await.is_some());
        assert!(session.save_current().await.is_none());
        assert_eq!(session.vocabulary().len(), 1);

        assert!(session.remove_saved("fox", &"en".to_string()));
        assert!(session.vocabulary().is_empty());
    }

    #[tokio::test]
    async fn nothing_to_save_before_a_resolved_lookup() {
        let mut session = session(None);
        session.set_text("fox").await;

        assert!(session.save_current().await.is_none());
        assert!(session.vocabulary().is_empty());
    }
}
