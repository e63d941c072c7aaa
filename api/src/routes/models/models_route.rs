use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{error, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult, ERR_MODELS_FAILED},
};

/// Handler: GET /api/models
///
/// Passes the backend's `/api/tags` body through unchanged.
#[instrument(name = "models_route", skip_all)]
pub async fn list_models(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    if !state.ollama.probe().await {
        warn!(ollama_url = %state.ollama_url(), "backend unreachable, models not listed");
        return Err(AppError::BackendUnreachable { response: None });
    }

    match state.ollama.list_models().await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response()),
        Err(err) => {
            error!(kind = err.kind(), error = %err, "model listing failed");
            Err(AppError::BackendCallFailed {
                error: ERR_MODELS_FAILED,
                response: None,
            })
        }
    }
}
