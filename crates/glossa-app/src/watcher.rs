use std::sync::Arc;
use std::time::Duration;

use glossa_core::detect::{DetectionState, LanguageDetector};
use glossa_provider::LexicalProvider;
use glossa_types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

/// Forward detection-state changes to the UI.
///
/// The detector updates its state from spawned timer tasks, so the UI is fed
/// by polling for changes rather than by a push from the detector itself.
pub async fn detection_watcher<L>(
    detector: Arc<LanguageDetector<L>>,
    interval: Duration,
    cancel: CancellationToken,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    let mut last = DetectionState::default();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("detection watcher stopping");
                break;
            }
            _ = ticker.tick() => {
                let state = detector.state().await;
                if state != last {
                    app_to_ui_tx
                        .send(AppEvent::DetectionUpdate {
                            language: state.language.clone(),
                            detecting: state.detecting,
                        })
                        .await?;
                    last = state;
                }
            }
        }
    }

    Ok(())
}
