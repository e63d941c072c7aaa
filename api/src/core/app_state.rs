use ai_llm_service::services::ollama_service::OllamaService;

use crate::{
    core::app_config::AppConfig, error_handler::AppError,
    routes::index::index_template::PageTemplates,
};

/// Shared state for all HTTP handlers.
///
/// Read-only after construction; handlers receive it as `State<Arc<AppState>>`.
#[derive(Debug)]
pub struct AppState {
    /// Startup configuration snapshot.
    pub config: AppConfig,
    /// Client for the Ollama backend (pooled connections).
    pub ollama: OllamaService,
    /// Compiled HTML templates.
    pub pages: PageTemplates,
}

impl AppState {
    /// Builds the state, the backend client and the page templates.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let ollama = OllamaService::new(config.ollama.clone())?;
        let pages = PageTemplates::new()?;
        Ok(Self {
            config,
            ollama,
            pages,
        })
    }

    /// Model identifier announced to clients and sent to the backend.
    pub fn model(&self) -> &str {
        &self.config.ollama.model
    }

    /// Backend base URL as configured.
    pub fn ollama_url(&self) -> &str {
        &self.config.ollama.endpoint
    }
}
