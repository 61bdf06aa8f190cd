use std::sync::Arc;
use std::time::Duration;

use glossa_core::session::{Session, SessionOptions};
use glossa_provider_rest::{RestLexicalClient, RestSpeechClient};
use glossa_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::console_loop;
use crate::watcher::detection_watcher;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // render burst capacity
            ui_to_app: kanal::bounded_async(64),  // UI interactions
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender used to inject events as if they came from the UI
    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let (lexical, speech, options) = {
            let config = self.state.config.read().await;

            if !config.provider.enabled || config.provider.api_key.is_empty() {
                tracing::warn!("Lexical provider not configured, lookups will fail");
            }

            (
                Arc::new(RestLexicalClient::new(
                    config.provider.api_key.clone(),
                    config.provider.api_url.clone(),
                )),
                Arc::new(RestSpeechClient::new(config.provider.speech_url.clone())),
                SessionOptions {
                    default_source: config.detection.default_language.clone(),
                    target: config.lookup.target_language.clone(),
                    detection_enabled: config.detection.enabled,
                    detect_quiet: Duration::from_millis(config.detection.quiet_ms),
                    lookup_timeout: (config.lookup.timeout_seconds > 0)
                        .then(|| Duration::from_secs(config.lookup.timeout_seconds)),
                },
            )
        };

        let session = Session::new(lexical, speech, options);
        let detector = session.detector();

        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            session,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Console UI loop
        tasks.spawn(console_loop(
            Arc::clone(&self.state),
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Detection state watcher
        let watcher_interval = Duration::from_millis(100);
        tasks.spawn(detection_watcher(
            detector,
            watcher_interval,
            self.cancel_token.child_token(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
