use std::sync::Arc;

use glossa_types::{AppEvent, TextSource, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Console front end: renders app events and turns typed commands into UI
/// events. Stands in for the pointer/selection adapter, so part indices are
/// given explicitly (`-` marks an endpoint outside the text).
pub async fn console_loop(
    state: Arc<AppState>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let max_examples = {
        let config = state.config.read().await;
        config.ui.max_examples as usize
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => {
                let event = event?;
                if matches!(event, AppEvent::UiEvent(UiEvent::Close)) {
                    break;
                }
                render(&event, max_examples);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                    break;
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match parse_command(line) {
                    Some(event) => {
                        let closing = matches!(event, AppEvent::UiEvent(UiEvent::Close));
                        ui_to_app_tx.send(event).await?;
                        if closing {
                            break;
                        }
                    }
                    None => print_help(),
                }
            }
        }
    }

    Ok(())
}

/// Map one console line to a UI event; `None` means unrecognized.
fn parse_command(line: &str) -> Option<AppEvent> {
    if !line.starts_with(':') {
        return Some(AppEvent::TextChanged {
            text: line.to_string(),
            source: TextSource::Manual,
        });
    }

    let mut words = line.split_whitespace();
    let command = words.next()?;

    match command {
        ":click" => {
            let index = words.next()?.parse().ok()?;
            Some(AppEvent::PartClicked(index))
        }
        ":select" => {
            let anchor = parse_endpoint(words.next()?)?;
            let focus = parse_endpoint(words.next()?)?;
            Some(AppEvent::SelectionMade { anchor, focus })
        }
        ":save" => Some(AppEvent::SaveCurrent),
        ":list" => Some(AppEvent::ListSaved),
        ":remove" => {
            let term = words.next()?.to_string();
            let language = words.next()?.to_string();
            Some(AppEvent::RemoveEntry { term, language })
        }
        ":clear" => Some(AppEvent::TextChanged {
            text: String::new(),
            source: TextSource::Manual,
        }),
        ":quit" => Some(AppEvent::UiEvent(UiEvent::Close)),
        _ => None,
    }
}

/// `-` stands for an endpoint the adapter could not map to a part
fn parse_endpoint(word: &str) -> Option<Option<usize>> {
    if word == "-" {
        return Some(None);
    }
    word.parse().ok().map(Some)
}

fn render(event: &AppEvent, max_examples: usize) {
    match event {
        AppEvent::BackendReady => {
            println!("Ready. Paste a line of text, then :click <n> or :select <a> <b>.");
        }
        AppEvent::ShowParts(parts) => {
            let words: Vec<String> = parts
                .iter()
                .filter(|p| p.is_word)
                .map(|p| format!("[{}] {}", p.index, p.surface))
                .collect();
            println!("{}", words.join("  "));
        }
        AppEvent::LookupPending { term } => {
            println!("Looking up '{}'...", term);
        }
        AppEvent::ShowDetail(detail) => {
            println!("{} ({})", detail.term, detail.language);
            if let Some(pronunciation) = &detail.pronunciation {
                println!("  {}", pronunciation);
            }
            if let Some(pos) = &detail.part_of_speech {
                println!("  {}", pos);
            }
            println!("  {}", detail.definition);
            if let Some(translation) = &detail.translation {
                println!("  translation: {}", translation);
            }
            for example in detail.examples.iter().take(max_examples) {
                println!("  - {}", example);
            }
            if !detail.related.is_empty() {
                println!("  see also: {}", detail.related.join(", "));
            }
            if detail.has_audio {
                println!("  (audio available)");
            }
        }
        AppEvent::LookupFailed { term, message } => {
            println!("'{}': {}", term, message);
        }
        AppEvent::DetectionUpdate {
            language,
            detecting,
        } => {
            if *detecting {
                println!("Detecting language...");
            } else if let Some(language) = language {
                println!("Detected language: {}", language);
            }
        }
        AppEvent::ShowSaved(entries) => {
            if entries.is_empty() {
                println!("No saved entries.");
            } else {
                for entry in entries {
                    println!("{} ({}): {}", entry.term, entry.language, entry.definition);
                }
            }
        }
        _ => {}
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <text>                set the text to look things up in");
    println!("  :click <n>            look up the word part at index n");
    println!("  :select <a> <b>       look up the words covered by parts a..b ('-' = unmapped)");
    println!("  :save                 save the current result");
    println!("  :list                 list saved entries");
    println!("  :remove <term> <lang> remove a saved entry");
    println!("  :clear                clear the text");
    println!("  :quit                 exit");
}
