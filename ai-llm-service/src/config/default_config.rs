//! Ollama config loaded from environment variables.
//!
//! Every variable is optional; unset or blank values fall back to the
//! defaults in [`OllamaConfig::default`].
//!
//! # Environment variables
//!
//! - `OLLAMA_BASE_URL` = backend base URL (default `http://localhost:11434`)
//! - `MODEL_NAME`      = model identifier (default `gemma3:1b`)

use crate::{
    config::ollama_config::OllamaConfig,
    error_handler::{ConfigError, non_empty},
};

/// Builds the chat config from the process environment.
///
/// # Errors
/// See [`config_ollama_chat_from`].
pub fn config_ollama_chat() -> Result<OllamaConfig, ConfigError> {
    config_ollama_chat_from(|name| std::env::var(name).ok())
}

/// Builds the chat config from an arbitrary variable lookup.
///
/// Useful for tests, which must not mutate the shared process environment.
///
/// # Errors
/// - [`ConfigError::InvalidFormat`] if `OLLAMA_BASE_URL` is not an http(s) URL
pub fn config_ollama_chat_from<F>(lookup: F) -> Result<OllamaConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = OllamaConfig::default();
    let cfg = OllamaConfig {
        endpoint: non_empty(lookup("OLLAMA_BASE_URL")).unwrap_or(defaults.endpoint),
        model: non_empty(lookup("MODEL_NAME")).unwrap_or(defaults.model),
        ..defaults
    };
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = config_ollama_chat_from(lookup(&[])).unwrap();
        assert_eq!(cfg, OllamaConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_ollama_chat_from(lookup(&[
            ("OLLAMA_BASE_URL", "http://gpu-box:11434"),
            ("MODEL_NAME", "qwen3:8b"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint, "http://gpu-box:11434");
        assert_eq!(cfg.model, "qwen3:8b");
        assert_eq!(cfg.chat_timeout_secs, 60);
    }

    #[test]
    fn blank_values_fall_back() {
        let cfg = config_ollama_chat_from(lookup(&[("MODEL_NAME", "   ")])).unwrap();
        assert_eq!(cfg.model, "gemma3:1b");
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = config_ollama_chat_from(lookup(&[("OLLAMA_BASE_URL", "localhost:11434")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
    }
}
