use ai_llm_service::{
    config::{default_config::config_ollama_chat_from, ollama_config::OllamaConfig},
    error_handler::{ConfigError, non_empty, parse_flag, parse_opt_u16},
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Process-wide configuration, read once at startup and injected into handlers
/// through [`AppState`](crate::core::app_state::AppState).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Raises workspace log verbosity to DEBUG.
    pub debug: bool,
    /// Backend settings (URL, model, sampling, timeouts).
    pub ollama: OllamaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: true,
            ollama: OllamaConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from environment variables.
    ///
    /// - `SERVER_HOST` / `FLASK_HOST` (default `0.0.0.0`)
    /// - `SERVER_PORT` / `FLASK_PORT` (default `5000`)
    /// - `DEBUG` (default `true`)
    /// - `OLLAMA_BASE_URL`, `MODEL_NAME` (see `ai_llm_service::config::default_config`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(lookup("SERVER_HOST"))
            .or_else(|| non_empty(lookup("FLASK_HOST")))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match parse_opt_u16("SERVER_PORT", lookup("SERVER_PORT"))? {
            Some(port) => port,
            None => parse_opt_u16("FLASK_PORT", lookup("FLASK_PORT"))?.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            host,
            port,
            debug: parse_flag(lookup("DEBUG"), true),
            ollama: config_ollama_chat_from(&lookup)?,
        })
    }

    /// `host:port` string for the listener (IPv6 hosts are bracketed).
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        AppConfig::from_lookup(|name| map.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_address(), "0.0.0.0:5000");
        assert_eq!(cfg.ollama.model, "gemma3:1b");
        assert!(cfg.debug);
    }

    #[test]
    fn flask_style_names_are_honoured() {
        let cfg = load(&[
            ("FLASK_HOST", "127.0.0.1"),
            ("FLASK_PORT", "8080"),
            ("DEBUG", "False"),
            ("MODEL_NAME", "llama3.2:3b"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_address(), "127.0.0.1:8080");
        assert!(!cfg.debug);
        assert_eq!(cfg.ollama.model, "llama3.2:3b");
    }

    #[test]
    fn server_names_take_precedence() {
        let cfg = load(&[
            ("FLASK_HOST", "127.0.0.1"),
            ("SERVER_HOST", "::1"),
            ("FLASK_PORT", "8080"),
            ("SERVER_PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "::1");
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.bind_address(), "[::1]:9090");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[("FLASK_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "FLASK_PORT", .. }));
    }

    #[test]
    fn invalid_backend_url_is_rejected() {
        let err = load(&[("OLLAMA_BASE_URL", "ftp://ollama")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
    }
}
