//! Development Tools
//!
//! Debug-build hot reload: a filesystem watcher rebuilds the page store when
//! content changes and then tells connected browsers to refresh over SSE.
//! Template and asset edits only trigger the refresh; markdown edits reload
//! the store first so the refreshed browser gets the new HTML instead of the
//! content parsed at startup.

use std::path::PathBuf;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{content::PageStore, state::AppState};

/// SSE endpoint for live reload.
pub async fn livereload_handler(
    State(state): State<AppState>,
) -> impl axum::response::IntoResponse {
    let (tx, rx) = mpsc::channel::<Result<Event, std::convert::Infallible>>(16);

    if let Some(reloader) = state.reloader() {
        let mut receiver = reloader.subscribe();

        tokio::spawn(async move {
            while receiver.recv().await.is_ok() {
                if tx.send(Ok(Event::default().data("reload"))).await.is_err() {
                    break;
                }
            }
        });
    }

    Sse::new(tokio_stream::wrappers::ReceiverStream::new(rx)).keep_alive(KeepAlive::default())
}

/// Spawn a watcher over templates, static assets, and the content directory.
pub fn spawn_file_watcher(state: AppState, content_dir: PathBuf) {
    std::thread::spawn(move || {
        let (tx, rx) = std::sync::mpsc::channel();

        let mut watcher =
            RecommendedWatcher::new(tx, Config::default()).expect("failed to create watcher");

        let watched = [
            PathBuf::from("templates"),
            PathBuf::from("public"),
            content_dir.clone(),
        ];

        for path in &watched {
            if path.exists() {
                match watcher.watch(path, RecursiveMode::Recursive) {
                    Ok(()) => info!("Watching {} for changes", path.display()),
                    Err(e) => error!("Failed to watch {}: {e}", path.display()),
                }
            }
        }

        // Outer recv fails only when the watcher channel closes
        while let Ok(result) = rx.recv() {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    error!("Watch error: {e:?}");
                    continue;
                }
            };

            if !(event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove()) {
                continue;
            }

            debug!("File change detected: {:?}", event.paths);

            if is_content_change(&event.paths) {
                state.replace_pages(PageStore::load(&content_dir));
                info!("Reloaded page content from {}", content_dir.display());
            }

            if let Some(reloader) = state.reloader() {
                let _ = reloader.send(());
            }
        }
    });
}

/// Whether any changed path is a markdown content file.
fn is_content_change(paths: &[PathBuf]) -> bool {
    paths
        .iter()
        .any(|p| p.extension().is_some_and(|ext| ext == "md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_edit_is_content_change() {
        let paths = vec![PathBuf::from("content/pages/home.md")];
        assert!(is_content_change(&paths));
    }

    #[test]
    fn test_stylesheet_edit_is_not_content_change() {
        let paths = vec![PathBuf::from("public/style.css")];
        assert!(!is_content_change(&paths));
    }

    #[test]
    fn test_mixed_paths_count_as_content_change() {
        let paths = vec![
            PathBuf::from("public/style.css"),
            PathBuf::from("content/pages/about.md"),
        ];
        assert!(is_content_change(&paths));
    }
}
