//! HTTP layer of the chat agent: router, handlers and server lifecycle.

pub mod core;
pub mod error_handler;
pub mod routes;

use std::{any::Any, sync::Arc};

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    core::{app_config::AppConfig, app_state::AppState},
    error_handler::{AppError, AppResult},
    routes::{
        chat::chat_route::chat, health::health_route::health, index::index_route::index,
        models::models_route::list_models,
    },
};

/// Builds the application router over shared state.
///
/// Routes:
/// - `GET  /`            chat page
/// - `POST /api/chat`    one chat turn
/// - `GET  /api/health`  server and backend status
/// - `GET  /api/models`  backend model list, passed through
pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .route("/api/models", get(list_models));

    with_middleware(routes).with_state(state)
}

/// Request tracing, panic recovery (500 JSON) and permissive CORS.
fn with_middleware(routes: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    routes
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
}

/// Starts the server and runs until Ctrl+C.
pub async fn start(config: AppConfig) -> AppResult<()> {
    let addr = config.bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        ollama_url = %state.ollama_url(),
        model = %state.model(),
        debug = state.config.debug,
        "starting chat agent"
    );

    if state.ollama.probe().await {
        info!(ollama_url = %state.ollama_url(), "Ollama server is reachable");
    } else {
        warn!(
            ollama_url = %state.ollama_url(),
            "Ollama server is not reachable; start it with `ollama serve`"
        );
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed the server
/// keeps running.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("handler panicked");
    AppError::Internal.into_response()
}
