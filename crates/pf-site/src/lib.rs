//! Pagefold Site Library
//!
//! Core library for the Pagefold page server: a small web application that
//! serves a welcome page at `/` and per-slug content pages at `/page-{id}`.

pub mod config;
pub mod content;
#[cfg(debug_assertions)]
pub mod dev_tools;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

use tokio::net::TcpListener;
use tracing::info;

use crate::{config::Config, content::PageStore, router::create_router, state::AppState};

/// Build version for cache busting static assets.
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the site server until Ctrl-C.
pub async fn run(config: Config) {
    let pages = PageStore::load(&config.content_dir);
    info!(
        "Loaded {} pages from {}",
        pages.len(),
        config.content_dir.display()
    );

    let state = AppState::new(pages);

    #[cfg(debug_assertions)]
    let state = {
        let state_with_reloader = state.with_reloader();
        dev_tools::spawn_file_watcher(state_with_reloader.clone(), config.content_dir.clone());
        state_with_reloader
    };

    let app = create_router(state);

    let listener = TcpListener::bind(config.addr)
        .await
        .expect("failed to bind to address");

    info!("Listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    info!("Shutting down gracefully...");
}
