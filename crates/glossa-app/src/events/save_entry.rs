use glossa_core::session::Session;
use glossa_provider::{LexicalProvider, SpeechSynthesizer};
use glossa_types::{AppEvent, DisplayEntry};
use kanal::AsyncSender;

pub async fn handle_save<L, S>(session: &mut Session<L, S>)
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    match session.save_current().await {
        Some(id) => tracing::info!("saved entry {}", id),
        None => tracing::debug!("nothing new to save"),
    }
}

pub fn handle_remove<L, S>(session: &mut Session<L, S>, term: &str, language: &str)
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    if session.remove_saved(term, &language.to_string()) {
        tracing::info!("removed '{}' ({})", term, language);
    } else {
        tracing::debug!("'{}' ({}) was not saved", term, language);
    }
}

pub async fn handle_list<L, S>(
    session: &Session<L, S>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    let entries: Vec<DisplayEntry> = session
        .vocabulary()
        .list()
        .iter()
        .map(|e| DisplayEntry {
            term: e.term.clone(),
            language: e.source.clone(),
            definition: e.detail.definition.clone(),
        })
        .collect();

    app_to_ui_tx.send(AppEvent::ShowSaved(entries)).await?;

    Ok(())
}
