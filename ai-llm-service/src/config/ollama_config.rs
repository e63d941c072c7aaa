use std::time::Duration;

use crate::error_handler::{ConfigError, validate_http_endpoint};

/// Default backend base URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemma3:1b";

/// Configuration for talking to one Ollama backend.
///
/// Constructed once at startup and never mutated afterwards.
///
/// # Fields
///
/// - `endpoint`: backend base URL (`http://host:port`, no trailing path).
/// - `model`: model identifier sent with every completion request.
/// - `temperature` / `max_tokens`: sampling options for completions.
/// - `probe_timeout_secs`: timeout of the `/api/tags` connectivity probe.
/// - `list_timeout_secs`: timeout of the model listing call.
/// - `chat_timeout_secs`: timeout of a chat completion call.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::ollama_config::OllamaConfig;
///
/// let cfg = OllamaConfig {
///     model: "llama3.2:3b".to_string(),
///     ..OllamaConfig::default()
/// };
/// assert_eq!(cfg.endpoint, "http://localhost:11434");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Backend base URL.
    pub endpoint: String,

    /// Model identifier (e.g. `"gemma3:1b"`).
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum number of tokens to generate.
    pub max_tokens: u32,

    pub probe_timeout_secs: u64,
    pub list_timeout_secs: u64,
    pub chat_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            probe_timeout_secs: 5,
            list_timeout_secs: 10,
            chat_timeout_secs: 60,
        }
    }
}

impl OllamaConfig {
    /// Checks the endpoint scheme and the model name.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `endpoint` is not an http(s) URL
    /// - [`ConfigError::EmptyModel`] if `model` is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_endpoint("OLLAMA_BASE_URL", &self.endpoint)?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        Ok(())
    }

    /// Endpoint without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }
}
