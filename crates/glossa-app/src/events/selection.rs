use glossa_core::lookup::LookupOutcome;
use glossa_core::selection::{PhraseResolution, SelectionSpan};
use glossa_core::session::Session;
use glossa_core::types::LookupKey;
use glossa_provider::{LexicalProvider, SpeechSynthesizer, WordDetail};
use glossa_types::{AppEvent, DisplayDetail};
use kanal::AsyncSender;

pub async fn handle_part_clicked<L, S>(
    session: &Session<L, S>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    index: usize,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    let Some(key) = session.key_for_click(index).await else {
        tracing::debug!("click on non-word part {}, ignoring", index);
        return Ok(());
    };

    start_lookup(session, app_to_ui_tx, key).await
}

pub async fn handle_selection<L, S>(
    session: &Session<L, S>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    anchor: Option<usize>,
    focus: Option<usize>,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    let resolution = session.resolve_selection(SelectionSpan { anchor, focus });

    match &resolution {
        PhraseResolution::NoSelection => {
            tracing::debug!("selection could not be mapped, ignoring");
            Ok(())
        }
        PhraseResolution::NonWord => {
            tracing::debug!("selection covers no words, ignoring");
            Ok(())
        }
        PhraseResolution::Single(_) | PhraseResolution::Phrase(_) => {
            match session.key_for(&resolution).await {
                Some(key) => start_lookup(session, app_to_ui_tx, key).await,
                None => Ok(()),
            }
        }
    }
}

/// Run the attempt on a spawned task so new events keep flowing while the
/// provider calls are in flight; a superseded outcome sends nothing.
async fn start_lookup<L, S>(
    session: &Session<L, S>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    key: LookupKey,
) -> anyhow::Result<()>
where
    L: LexicalProvider + 'static,
    S: SpeechSynthesizer + 'static,
{
    app_to_ui_tx
        .send(AppEvent::LookupPending {
            term: key.term.clone(),
        })
        .await?;

    let coordinator = session.coordinator();
    let tx = app_to_ui_tx.clone();

    // Begin here so attempt order follows event order; only the fetch runs on
    // the spawned task
    let attempt = coordinator.begin(key.clone()).await;

    tokio::spawn(async move {
        match coordinator.run(attempt).await {
            LookupOutcome::Resolved(detail) => {
                let _ = tx
                    .send(AppEvent::ShowDetail(display_detail(&key, &detail)))
                    .await;
            }
            LookupOutcome::Failed { reason, message } => {
                tracing::warn!("lookup for '{}' failed: {}", key.term, reason);
                let _ = tx
                    .send(AppEvent::LookupFailed {
                        term: key.term,
                        message,
                    })
                    .await;
            }
            LookupOutcome::Superseded => {
                tracing::debug!("lookup for '{}' superseded, dropping", key.term);
            }
        }
    });

    Ok(())
}

fn display_detail(key: &LookupKey, detail: &WordDetail) -> DisplayDetail {
    DisplayDetail {
        term: key.term.clone(),
        language: key.source.clone(),
        definition: detail.definition.clone(),
        pronunciation: detail.pronunciation.clone(),
        part_of_speech: detail.part_of_speech.clone(),
        examples: detail.example_sentences.clone(),
        related: detail.related_words.clone(),
        translation: detail.translation.clone(),
        has_audio: detail.audio.is_some(),
    }
}
