//! Stylist chat server
//!
//! Wires the collaborators together and serves the chat endpoints.

mod http;
mod render;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use stylist_agent::{InMemorySessionStore, SessionStore, StylistAgent};
use stylist_catalog::{CatalogSearch, RecommendClient};
use stylist_config::load_settings;
use stylist_llm::{ChatModel, OpenAiBackend};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("STYLIST_CONFIG").ok();
    let settings = Arc::new(
        load_settings(config_path.as_deref().or(Some("stylist.toml")))
            .context("failed to load settings")?,
    );

    let model: Arc<dyn ChatModel> = Arc::new(
        OpenAiBackend::new(settings.openai.clone()).context("failed to build model client")?,
    );
    if !model.has_credentials() {
        tracing::warn!("no OpenAI API key configured; chat requests will fail until one is set");
    }

    let catalog: Arc<dyn CatalogSearch> = Arc::new(
        RecommendClient::new(settings.catalog.clone()).context("failed to build catalog client")?,
    );

    let sessions = Arc::new(InMemorySessionStore::new(settings.session.ttl()));
    let cleanup_shutdown = sessions.start_cleanup_task(settings.session.cleanup_interval());

    let agent = Arc::new(StylistAgent::new(
        model.clone(),
        catalog.clone(),
        sessions.clone() as Arc<dyn SessionStore>,
        settings.brands.clone(),
    ));

    let app = http::create_router(AppState {
        agent,
        model,
        catalog,
        settings: settings.clone(),
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "stylist server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let _ = cleanup_shutdown.send(true);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
