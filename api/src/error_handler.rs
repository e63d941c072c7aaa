use ai_llm_service::error_handler::{AiLlmError, ConfigError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::routes::chat::chat_request::ValidationError;

/// Machine-readable `error` strings of the public contract.
pub const ERR_BACKEND_UNREACHABLE: &str = "Ollama server not accessible";
pub const ERR_CHAT_FAILED: &str = "Failed to get AI response";
pub const ERR_MODELS_FAILED: &str = "Failed to fetch models";
pub const ERR_INTERNAL: &str = "Internal server error";

const INTERNAL_RESPONSE: &str = "Sorry, an unexpected error occurred. Please try again.";

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Service(#[from] AiLlmError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request time ---
    /// Client sent an unusable payload (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Connectivity probe failed (503).
    #[error("Ollama server not accessible")]
    BackendUnreachable {
        /// Optional text for direct display in the chat UI.
        response: Option<String>,
    },

    /// Backend is reachable but the forwarded call failed (500).
    #[error("{error}")]
    BackendCallFailed {
        error: &'static str,
        response: Option<String>,
    },

    /// Anything unexpected, including handler panics (500).
    #[error("internal server error")]
    Internal,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::Validation(_) => StatusCode::BAD_REQUEST,

            // 5xx
            AppError::BackendUnreachable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BackendCallFailed { .. } | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // startup-only
            AppError::Config(_) | AppError::Service(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            AppError::Validation(err) => ErrorBody {
                error: err.to_string(),
                response: None,
            },
            AppError::BackendUnreachable { response } => ErrorBody {
                error: ERR_BACKEND_UNREACHABLE.to_string(),
                response: response.clone(),
            },
            AppError::BackendCallFailed { error, response } => ErrorBody {
                error: error.to_string(),
                response: response.clone(),
            },
            _ => ErrorBody {
                error: ERR_INTERNAL.to_string(),
                response: Some(INTERNAL_RESPONSE.to_string()),
            },
        }
    }
}

/// Error payload: machine-readable `error`, plus `response` text the UI can
/// show verbatim when there is one.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Body that is not JSON, or whose fields have the wrong shape.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        debug!(reason = %err.body_text(), "rejected chat payload");
        AppError::Validation(ValidationError::MalformedBody)
    }
}
