use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use glossa_provider::{LanguageCode, LexicalProvider};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Detection status exposed to the UI layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionState {
    pub language: Option<LanguageCode>,
    pub detecting: bool,
}

/// Debounced source-language detection.
///
/// Every text change replaces the pending timer; only the text that survives a
/// full quiet period triggers a provider call. Stale timers and stale call
/// results are dropped by generation comparison, so clearing the input resets
/// the state without waiting for an outstanding call.
pub struct LanguageDetector<L> {
    provider: Arc<L>,
    quiet: Duration,
    generation: Arc<AtomicU64>,
    state: Arc<RwLock<DetectionState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<L> LanguageDetector<L>
where
    L: LexicalProvider + 'static,
{
    pub fn new(provider: Arc<L>, quiet: Duration) -> Self {
        Self {
            provider,
            quiet,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(RwLock::new(DetectionState::default())),
            pending: Mutex::new(None),
        }
    }

    pub async fn state(&self) -> DetectionState {
        self.state.read().await.clone()
    }

    /// Reschedule detection for the latest text, replacing any pending timer.
    ///
    /// Empty text resets the detection state immediately.
    pub async fn text_changed(&self, text: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        if text.trim().is_empty() {
            *self.state.write().await = DetectionState::default();
            return;
        }

        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        let generations = Arc::clone(&self.generation);
        let quiet = self.quiet;
        let text = text.to_string();

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;

            if generations.load(Ordering::SeqCst) != generation {
                return;
            }
            {
                let mut guard = state.write().await;
                if generations.load(Ordering::SeqCst) == generation {
                    guard.detecting = true;
                }
            }

            let language = match provider.detect_language(&text).await {
                Ok(answer) => answer.filter(|code| provider.supported_languages().contains(code)),
                Err(e) => {
                    // Detection failure is silent; consumers fall back to the
                    // default source language
                    tracing::debug!("language detection failed: {}", e);
                    None
                }
            };

            let mut guard = state.write().await;
            if generations.load(Ordering::SeqCst) == generation {
                tracing::debug!("detected language: {:?}", language);
                *guard = DetectionState {
                    language,
                    detecting: false,
                };
            }
        }));
    }
}
