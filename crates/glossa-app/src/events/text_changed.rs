use glossa_core::session::Session;
use glossa_provider::{LexicalProvider, SpeechSynthesizer};
use glossa_types::{AppEvent, DisplayPart};
use kanal::AsyncSender;

pub async fn handle_text_changed<L, S>(
    session: &mut Session<L, S>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: String,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    let parts = session.set_text(&text).await;

    let display: Vec<DisplayPart> = parts
        .iter()
        .map(|p| DisplayPart {
            index: p.index,
            surface: p.surface.clone(),
            is_word: p.is_word(),
        })
        .collect();

    app_to_ui_tx.send(AppEvent::ShowParts(display)).await?;

    Ok(())
}
