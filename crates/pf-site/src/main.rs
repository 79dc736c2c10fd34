//! Pagefold Site
//!
//! Entry point for the Pagefold page server.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pf_site::config::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "pf_site=debug,tower_http=debug".parse().expect("valid filter")
        }))
        .with(fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Pagefold site server");

    pf_site::run(config).await;
}
