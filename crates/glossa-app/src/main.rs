use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use glossa_config::Config;
use glossa_types::{AppEvent, TextSource};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod state;
mod ui;
mod watcher;

#[cfg(test)]
mod tests;

use crate::controller::AppController;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "glossa", about = "Interactive word and phrase lookup")]
struct Args {
    /// Read the initial text from a file instead of waiting for input
    #[arg(long)]
    file: Option<PathBuf>,

    /// Override the lookup target language (ISO 639-1)
    #[arg(long)]
    target_lang: Option<String>,

    /// Disable automatic source-language detection
    #[arg(long)]
    no_detect: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let mut config = Config::new();
    if let Some(lang) = args.target_lang {
        config.lookup.target_language = lang;
    }
    if args.no_detect {
        config.detection.enabled = false;
    }

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(Arc::clone(&state));
    let mut tasks = controller.spawn_tasks().await;

    if let Some(path) = args.file {
        let text = tokio::fs::read_to_string(&path).await?;
        controller
            .ui_sender()
            .send(AppEvent::TextChanged {
                text,
                source: TextSource::File,
            })
            .await?;
    }

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task exited cleanly"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if atty::is(atty::Stream::Stdout) {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    }
}
