use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use scribe_api::config::ServerConfig;
use scribe_api::router::build_app_router;
use scribe_api::state::AppState;
use scribe_core::tokens::TokenCounter;
use scribe_llm::{OpenAiClient, ProviderConfig};
use scribe_pipeline::{GenerationConfig, GenerationOrchestrator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scribe_api=debug,scribe_pipeline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        max_asset_tokens = config.token_limits.max_asset_tokens,
        max_prompt_tokens = config.token_limits.max_prompt_tokens,
        "Loaded server configuration",
    );

    let generation_config = GenerationConfig::from_env();
    tracing::info!(
        models = ?generation_config.models,
        max_duration_secs = generation_config.max_duration.as_secs(),
        "Loaded generation configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = scribe_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    scribe_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    // --- Tokenizer ---
    let tokens = TokenCounter::shared();
    tracing::info!(encoding = scribe_core::tokens::ENCODING_NAME, "Tokenizer loaded");

    // --- Provider ---
    let provider_config = ProviderConfig::from_env();
    let provider = OpenAiClient::new(&provider_config).expect("Failed to build provider HTTP client");
    tracing::info!(base_url = %provider_config.base_url, "Provider client ready");

    let orchestrator = Arc::new(GenerationOrchestrator::new(
        pool.clone(),
        Arc::new(provider),
        generation_config,
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator,
        tokens,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    // In-flight requests get at most `SHUTDOWN_TIMEOUT_SECS` to drain.
    tokio::select! {
        result = server => {
            result.expect("Server error");
            tracing::info!("Graceful shutdown complete");
        }
        () = async {
            shutdown_signal().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(drain_secs = drain.as_secs(), "Shutdown timeout elapsed, exiting");
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
