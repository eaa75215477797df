//! Root-level liveness endpoint. Mounted outside `/api/v1` and open to
//! unauthenticated callers.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use scribe_core::eligibility::TokenLimits;
use scribe_core::tokens::ENCODING_NAME;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub generation: GenerationStatus,
}

/// What a generation run would use right now.
#[derive(Debug, Serialize)]
pub struct GenerationStatus {
    pub models: Vec<String>,
    pub active_runs: usize,
    pub encoding: &'static str,
    pub limits: TokenLimits,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = scribe_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        generation: GenerationStatus {
            models: state.orchestrator.models().to_vec(),
            active_runs: state.orchestrator.active_runs(),
            encoding: ENCODING_NAME,
            limits: state.config.token_limits,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
