//! POST /api/chat: forwards one chat turn to the Ollama backend.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{error, info, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult, ERR_CHAT_FAILED},
    routes::chat::{
        chat_request::{ChatRequest, ValidationError},
        chat_response::ChatResponse,
    },
};

/// Handler: POST /api/chat
///
/// Steps, stopping at the first failure:
/// 1. validate the payload (400)
/// 2. build the message list (history as-is, or the message alone)
/// 3. probe the backend (503)
/// 4. request the completion (500)
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"hi"}'
/// ```
#[instrument(name = "chat_route", skip_all, fields(model = %state.model()))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Option<ChatRequest>>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    let chat = body
        .ok_or(ValidationError::MissingMessage)
        .and_then(ChatRequest::validate)
        .inspect_err(|err| info!(reason = %err, "chat payload rejected"))?;
    let messages = chat.into_messages();

    if !state.ollama.probe().await {
        warn!(ollama_url = %state.ollama_url(), "backend unreachable, chat not forwarded");
        return Err(AppError::BackendUnreachable {
            response: Some(format!(
                "Sorry, I cannot connect to the Ollama server. Please make sure Ollama is running on {} and the {} model is available.",
                state.ollama_url(),
                state.model()
            )),
        });
    }

    let Some(reply) = state
        .ollama
        .chat_completion(state.model(), &messages)
        .await
    else {
        error!(messages = messages.len(), "no reply from backend");
        return Err(AppError::BackendCallFailed {
            error: ERR_CHAT_FAILED,
            response: Some(
                "Sorry, I encountered an error while processing your message. Please try again."
                    .to_string(),
            ),
        });
    };

    Ok(Json(ChatResponse::success(reply, state.model())))
}
