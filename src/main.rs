//! Reply Drafter HTTP server entry point.
//!
//! Loads configuration, installs the tracing subscriber, wires the OpenAI
//! client and local settings store into the draft handler, then serves the
//! REST API until Ctrl+C or SIGTERM.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use reply_drafter::adapters::http::{build_router, DraftHandlers, SettingsHandlers};
use reply_drafter::adapters::{LocalSettingsStore, OpenAICompletionClient, OpenAIConfig};
use reply_drafter::application::handlers::draft::{DraftReplyHandler, DraftRetrier};
use reply_drafter::config::{AppConfig, ServerConfig};
use reply_drafter::domain::draft::DraftParser;
use reply_drafter::ports::SettingsStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    if !config.ai.has_openai() {
        tracing::warn!("OPENAI_API_KEY is not set; draft requests will be rejected");
    }

    let client = OpenAICompletionClient::new(
        OpenAIConfig::new(config.ai.openai_api_key.clone())
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;

    let retrier = DraftRetrier::new(Arc::new(client))
        .with_policy(config.drafting.retry_policy())
        .with_parser(DraftParser::new(&config.drafting.fallback_subject))
        .with_temperature(config.ai.temperature)
        .with_response_format(config.ai.response_format);
    let draft_handler = Arc::new(DraftReplyHandler::new(retrier, &config.ai.model));

    let settings_store: Arc<dyn SettingsStore> =
        Arc::new(LocalSettingsStore::new(&config.settings.dir));

    let router = build_router(
        DraftHandlers::new(draft_handler, settings_store.clone()),
        SettingsHandlers::new(settings_store),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        model = %config.ai.model,
        max_attempts = config.drafting.max_attempts,
        request_timeout_secs = config.server.request_timeout_secs,
        "Reply drafter listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over `server.log_level`;
/// production logs are JSON.
fn init_tracing(server: &ServerConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
