use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::{
    core::app_state::AppState,
    routes::health::health_response::{HealthResponse, OllamaStatus},
};

/// Handler: GET /api/health
///
/// Always 200. Backend reachability is reported in the body, probed fresh on
/// every call.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ollama = OllamaStatus::from(state.ollama.probe().await);
    debug!(?ollama, "health check");

    Json(HealthResponse {
        server: "running",
        ollama,
        model: state.model().to_string(),
        ollama_url: state.ollama_url().to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
