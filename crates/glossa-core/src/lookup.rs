use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use glossa_provider::{LexicalProvider, ProviderError, SpeechSynthesizer, WordDetail};
use tokio::sync::RwLock;

use crate::error::LookupFailure;
use crate::types::LookupKey;

/// Visible state of the active lookup attempt
#[derive(Debug, Clone, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Pending,
    Resolved(WordDetail),
    Failed {
        reason: LookupFailure,
        message: String,
    },
}

/// What one attempt produced, as seen by its caller.
///
/// `Superseded` means a newer attempt replaced this one while its provider
/// calls were in flight; the outcome was dropped and must not be shown.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Resolved(WordDetail),
    Failed {
        reason: LookupFailure,
        message: String,
    },
    Superseded,
}

/// One started attempt, holding the generation it must commit against
#[derive(Debug)]
pub struct Attempt {
    key: LookupKey,
    generation: u64,
}

impl Attempt {
    pub fn key(&self) -> &LookupKey {
        &self.key
    }
}

/// Runs lookup attempts against the text and audio providers.
///
/// Starting a new attempt preempts any prior one: no cancellation signal is
/// sent, but a stale attempt's outcome is discarded at commit time by
/// comparing its generation against the current one.
pub struct LookupCoordinator<L, S> {
    lexical: Arc<L>,
    speech: Arc<S>,
    timeout: Option<Duration>,
    generation: AtomicU64,
    active: RwLock<Option<LookupKey>>,
    state: RwLock<LookupState>,
}

impl<L, S> LookupCoordinator<L, S>
where
    L: LexicalProvider,
    S: SpeechSynthesizer,
{
    pub fn new(lexical: Arc<L>, speech: Arc<S>, timeout: Option<Duration>) -> Self {
        Self {
            lexical,
            speech,
            timeout,
            generation: AtomicU64::new(0),
            active: RwLock::new(None),
            state: RwLock::new(LookupState::Idle),
        }
    }

    pub async fn state(&self) -> LookupState {
        self.state.read().await.clone()
    }

    pub async fn active_key(&self) -> Option<LookupKey> {
        self.active.read().await.clone()
    }

    /// Start an attempt: bump the generation, record the active key and move
    /// to `Pending`, clearing any previous result.
    ///
    /// Kept separate from [`run`](Self::run) so callers can fix attempt order
    /// at event-handling time and run the fetch on a spawned task.
    pub async fn begin(&self, key: LookupKey) -> Attempt {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            *self.active.write().await = Some(key.clone());
            *state = LookupState::Pending;
        }
        tracing::debug!("lookup attempt {} for '{}'", generation, key.term);

        Attempt { key, generation }
    }

    /// Convenience wrapper: begin and run in one call
    pub async fn lookup(&self, key: LookupKey) -> LookupOutcome {
        let attempt = self.begin(key).await;
        self.run(attempt).await
    }

    /// Run one started attempt to completion.
    ///
    /// Both provider calls are issued concurrently and awaited jointly; the
    /// attempt leaves `Pending` only after both settle. Audio failure is
    /// non-fatal, text failure is.
    pub async fn run(&self, attempt: Attempt) -> LookupOutcome {
        let Attempt { key, generation } = attempt;

        let fetch = async {
            tokio::join!(
                self.lexical
                    .term_details(&key.term, key.source.clone(), key.target.clone()),
                self.speech.synthesize(&key.term),
            )
        };

        let (text, audio) = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(settled) => settled,
                Err(_) => {
                    tracing::warn!("lookup for '{}' timed out after {:?}", key.term, limit);
                    (
                        Err(ProviderError::ApiError("request timed out".to_string())),
                        Ok(None),
                    )
                }
            },
            None => fetch.await,
        };

        let outcome = match text {
            Ok(Some(mut detail)) if detail.is_well_formed() => {
                detail.audio = match audio {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::debug!("audio unavailable for '{}': {}", key.term, e);
                        None
                    }
                };
                // Same-language lookups never carry a translation
                if key.source == key.target {
                    detail.translation = None;
                }
                LookupOutcome::Resolved(detail)
            }
            Ok(_) => LookupOutcome::Failed {
                reason: LookupFailure::MalformedResponse,
                message: LookupFailure::MalformedResponse.user_message().to_string(),
            },
            Err(e) => {
                tracing::warn!("lookup for '{}' failed: {}", key.term, e);
                LookupOutcome::Failed {
                    reason: LookupFailure::Provider,
                    message: LookupFailure::Provider.user_message().to_string(),
                }
            }
        };

        self.commit(generation, outcome).await
    }

    /// Apply an attempt's outcome unless a newer attempt has started since.
    async fn commit(&self, generation: u64, outcome: LookupOutcome) -> LookupOutcome {
        let mut state = self.state.write().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("dropping stale outcome from attempt {}", generation);
            return LookupOutcome::Superseded;
        }

        match &outcome {
            LookupOutcome::Resolved(detail) => {
                *state = LookupState::Resolved(detail.clone());
            }
            LookupOutcome::Failed { reason, message } => {
                *state = LookupState::Failed {
                    reason: *reason,
                    message: message.clone(),
                };
            }
            LookupOutcome::Superseded => {}
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use glossa_provider::{LanguageCode, ProviderMetadata, SpeechError};
    use tokio::time::timeout;

    use super::*;

    /// Lexical fake that builds a detail from the term it was asked about
    struct EchoLexical {
        slow_term: Option<String>,
        missing: bool,
        fail: bool,
        empty_definition: bool,
        calls: AtomicUsize,
    }

    impl EchoLexical {
        fn ok() -> Self {
            Self {
                slow_term: None,
                missing: false,
                fail: false,
                empty_definition: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl LexicalProvider for EchoLexical {
        async fn term_details(
            &self,
            term: &str,
            source: LanguageCode,
            target: LanguageCode,
        ) -> Result<Option<WordDetail>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let delay = if self.slow_term.as_deref() == Some(term) {
                Duration::from_millis(200)
            } else {
                Duration::from_millis(5)
            };
            tokio::time::sleep(delay).await;

            if self.fail {
                return Err(ProviderError::ApiError("boom".to_string()));
            }
            if self.missing {
                return Ok(None);
            }

            Ok(Some(WordDetail {
                definition: if self.empty_definition {
                    "  ".to_string()
                } else {
                    format!("definition of {term}")
                },
                example_sentences: vec![format!("An example with {term}.")],
                // Always answered, even for same-language requests; the
                // coordinator is responsible for stripping it
                translation: Some(format!("{term} in {target}")),
                part_of_speech: Some("noun".to_string()),
                pronunciation: Some(format!("/{term}/")),
                related_words: vec![],
                audio: None,
            }))
        }

        async fn detect_language(
            &self,
            _text: &str,
        ) -> Result<Option<LanguageCode>, ProviderError> {
            Ok(None)
        }

        fn supported_languages(&self) -> Vec<LanguageCode> {
            vec!["en".to_string(), "de".to_string()]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "echo".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    struct FixedSpeech {
        audio: Option<Vec<u8>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl SpeechSynthesizer for FixedSpeech {
        async fn synthesize(&self, _term: &str) -> Result<Option<Vec<u8>>, SpeechError> {
            if self.fail {
                return Err(SpeechError::ApiError("no voice".to_string()));
            }
            Ok(self.audio.clone())
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "fixed".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    fn key(term: &str, source: &str, target: &str) -> LookupKey {
        LookupKey {
            term: term.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    fn coordinator(
        lexical: EchoLexical,
        speech: FixedSpeech,
    ) -> Arc<LookupCoordinator<EchoLexical, FixedSpeech>> {
        Arc::new(LookupCoordinator::new(
            Arc::new(lexical),
            Arc::new(speech),
            None,
        ))
    }

    #[tokio::test]
    async fn resolves_and_merges_audio() {
        let coordinator = coordinator(
            EchoLexical::ok(),
            FixedSpeech {
                audio: Some(vec![1, 2, 3]),
                fail: false,
            },
        );

        match coordinator.lookup(key("fox", "en", "de")).await {
            LookupOutcome::Resolved(detail) => {
                assert_eq!(detail.definition, "definition of fox");
                assert_eq!(detail.audio, Some(vec![1, 2, 3]));
                assert_eq!(detail.translation.as_deref(), Some("fox in de"));
            }
            other => panic!("expected resolved, got {other:?}"),
        }

        assert!(matches!(
            coordinator.state().await,
            LookupState::Resolved(_)
        ));
    }

    #[tokio::test]
    async fn audio_failure_is_not_fatal() {
        let coordinator = coordinator(
            EchoLexical::ok(),
            FixedSpeech {
                audio: None,
                fail: true,
            },
        );

        match coordinator.lookup(key("fox", "en", "de")).await {
            LookupOutcome::Resolved(detail) => assert_eq!(detail.audio, None),
            other => panic!("expected resolved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn same_language_lookup_never_carries_translation() {
        let coordinator = coordinator(
            EchoLexical::ok(),
            FixedSpeech {
                audio: None,
                fail: false,
            },
        );

        match coordinator.lookup(key("fox", "en", "en")).await {
            LookupOutcome::Resolved(detail) => assert_eq!(detail.translation, None),
            other => panic!("expected resolved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_payload_is_malformed_response() {
        let coordinator = coordinator(
            EchoLexical {
                missing: true,
                ..EchoLexical::ok()
            },
            FixedSpeech {
                audio: None,
                fail: false,
            },
        );

        match coordinator.lookup(key("fox", "en", "de")).await {
            LookupOutcome::Failed { reason, message } => {
                assert_eq!(reason, LookupFailure::MalformedResponse);
                assert_eq!(message, LookupFailure::MalformedResponse.user_message());
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_definition_fails_validation() {
        let coordinator = coordinator(
            EchoLexical {
                empty_definition: true,
                ..EchoLexical::ok()
            },
            FixedSpeech {
                audio: None,
                fail: false,
            },
        );

        match coordinator.lookup(key("fox", "en", "de")).await {
            LookupOutcome::Failed { reason, .. } => {
                assert_eq!(reason, LookupFailure::MalformedResponse);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_error_keeps_its_own_reason() {
        let coordinator = coordinator(
            EchoLexical {
                fail: true,
                ..EchoLexical::ok()
            },
            FixedSpeech {
                audio: None,
                fail: false,
            },
        );

        match coordinator.lookup(key("fox", "en", "de")).await {
            LookupOutcome::Failed { reason, .. } => assert_eq!(reason, LookupFailure::Provider),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn newer_attempt_preempts_older_one() {
        let coordinator = coordinator(
            EchoLexical {
                slow_term: Some("slow".to_string()),
                ..EchoLexical::ok()
            },
            FixedSpeech {
                audio: None,
                fail: false,
            },
        );

        let first = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.lookup(key("slow", "en", "de")).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = coordinator.lookup(key("fast", "en", "de")).await;
        assert!(matches!(second, LookupOutcome::Resolved(_)));

        let first = timeout(Duration::from_secs(2), first)
            .await
            .expect("first attempt never settled")
            .expect("first attempt panicked");
        assert!(matches!(first, LookupOutcome::Superseded));

        // Only the newer attempt's outcome is visible
        match coordinator.state().await {
            LookupState::Resolved(detail) => {
                assert_eq!(detail.definition, "definition of fast");
            }
            other => panic!("expected resolved state, got {other:?}"),
        }
        assert_eq!(
            coordinator.active_key().await,
            Some(key("fast", "en", "de"))
        );
    }

    #[tokio::test]
    async fn bounded_timeout_maps_to_provider_failure() {
        let coordinator = Arc::new(LookupCoordinator::new(
            Arc::new(EchoLexical {
                slow_term: Some("slow".to_string()),
                ..EchoLexical::ok()
            }),
            Arc::new(FixedSpeech {
                audio: None,
                fail: false,
            }),
            Some(Duration::from_millis(50)),
        ));

        match coordinator.lookup(key("slow", "en", "de")).await {
            LookupOutcome::Failed { reason, .. } => assert_eq!(reason, LookupFailure::Provider),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
