use glossa_core::session::Session;
use glossa_provider::{LexicalProvider, SpeechSynthesizer};
use glossa_types::{AppEvent, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};

pub mod save_entry;
pub mod selection;
pub mod text_changed;

use save_entry::{handle_list, handle_remove, handle_save};
use selection::{handle_part_clicked, handle_selection};
use text_changed::handle_text_changed;

/// App's main loop
pub async fn event_loop<L, S>(
    mut session: Session<L, S>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        let event = ui_to_app_rx.recv().await?;

        if !handle_events(&mut session, &app_to_ui_tx, event).await? {
            tracing::info!("[EVENT_LOOP] Close requested, stopping");
            break;
        }
    }

    Ok(())
}

/// Returns `false` when the loop should stop.
async fn handle_events<L, S>(
    session: &mut Session<L, S>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<bool>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    match event {
        AppEvent::ConfigChanged => {}
        AppEvent::UiEvent(UiEvent::Close) => return Ok(false),
        AppEvent::UiEvent(_) => {}
        AppEvent::TextChanged { text, source } => {
            tracing::debug!("TextChanged ({:?}): {} chars", source, text.len());
            handle_text_changed(session, app_to_ui_tx, text).await?;
        }
        AppEvent::PartClicked(index) => {
            handle_part_clicked(session, app_to_ui_tx, index).await?;
        }
        AppEvent::SelectionMade { anchor, focus } => {
            handle_selection(session, app_to_ui_tx, anchor, focus).await?;
        }
        AppEvent::SaveCurrent => {
            handle_save(session).await;
        }
        AppEvent::RemoveEntry { term, language } => {
            handle_remove(session, &term, &language);
        }
        AppEvent::ListSaved => {
            handle_list(session, app_to_ui_tx).await?;
        }
        _ => {
            // UI-only events, ignore in backend
        }
    }

    Ok(true)
}
