use std::sync::Arc;

use axum::{extract::State, response::Html};
use tracing::error;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Handler: GET /
///
/// Serves the chat page with the configured model shown in the header.
pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    state
        .pages
        .render_index(state.model())
        .map(Html)
        .map_err(|err| {
            error!(error = %err, "chat page rendering failed");
            AppError::Internal
        })
}
