//! DigiNativa API server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diginativa::api::{cors_layer, create_router, AppState};
use diginativa::auth::StaticTokenIntrospector;
use diginativa::config::{AppConfig, LogFormat};
use diginativa::progress::InMemoryProgress;
use diginativa::storage::create_storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let store = create_storage(config.storage_runtime());
    let introspector = Arc::new(StaticTokenIntrospector::new(config.auth.token_table()));
    if config.auth.tokens.is_empty() {
        tracing::warn!("No bearer tokens configured; dashboard endpoints will reject every caller");
    }

    tracing::info!("Progress source is in-memory and starts empty; dashboards report zero progress");

    let state = AppState::new(store, Arc::new(InMemoryProgress::new()), introspector)
        .with_service_name(&config.server.service_name)
        .with_request_timeout(config.server.request_timeout());

    let router = create_router(state).layer(cors_layer(&config.cors));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, service = %config.server.service_name, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("diginativa=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
