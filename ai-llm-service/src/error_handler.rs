//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`UpstreamError`]). Small helpers for reading/validating raw configuration
//! values are provided as well.
//!
//! All messages include the prefix `[AI LLM Service]` to simplify attribution in logs.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Maximum number of characters kept from an upstream body for logs.
const SNIPPET_MAX_CHARS: usize = 240;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client itself could not be built.
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Only errors that realistically happen at config load/validation time.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A number failed to parse (ports, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `SERVER_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u16`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OLLAMA_BASE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Upstream errors                                                           */
/* ------------------------------------------------------------------------- */

/// Non-successful HTTP exchange with the backend.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status returned by the backend.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (see [`make_snippet`]).
    pub snippet: String,
}

/// Why a call to the Ollama backend failed.
///
/// The HTTP layer only exposes a generic failure message to clients; this
/// enum keeps the concrete reason for logs.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request did not complete within its timeout.
    #[error("[AI LLM Service] request to {url} timed out after {after:?}")]
    Timeout {
        /// Request URL.
        url: String,
        /// Timeout that was applied.
        after: Duration,
    },

    /// TCP/TLS connection could not be established (refused, DNS, unreachable).
    #[error("[AI LLM Service] cannot connect to {url}: {message}")]
    Connect {
        /// Request URL.
        url: String,
        /// Underlying client message.
        message: String,
    },

    /// Any other transport failure (reset, body read, redirect loop, ...).
    #[error("[AI LLM Service] transport error for {url}: {message}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying client message.
        message: String,
    },

    /// Backend answered with an unexpected status.
    #[error("[AI LLM Service] HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),

    /// Completion response had no usable `choices[0].message.content`.
    #[error("[AI LLM Service] completion response contained no message content")]
    EmptyChoices,
}

impl UpstreamError {
    /// Classifies a `reqwest` failure for the given request.
    pub fn from_reqwest(err: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if err.is_timeout() {
            return UpstreamError::Timeout {
                url: url.to_string(),
                after: timeout,
            };
        }
        if err.is_connect() {
            return UpstreamError::Connect {
                url: url.to_string(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return UpstreamError::Decode(err.to_string());
        }
        UpstreamError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout { .. } => "timeout",
            UpstreamError::Connect { .. } => "connection_refused",
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::HttpStatus(_) => "bad_status",
            UpstreamError::Decode(_) => "malformed_body",
            UpstreamError::EmptyChoices => "empty_choices",
        }
    }
}

/// Collapses whitespace and truncates an upstream body for logging.
pub fn make_snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_MAX_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(SNIPPET_MAX_CHARS).collect();
    out.push('…');
    out
}

/* ------------------------------------------------------------------------- */
/* Raw value helpers                                                         */
/* ------------------------------------------------------------------------- */

/// Returns the value when it is set and not blank.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses an optional `u16` (`Ok(None)` if unset/blank).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the value is set but not a valid `u16`.
pub fn parse_opt_u16(
    var: &'static str,
    raw: Option<String>,
) -> std::result::Result<Option<u16>, ConfigError> {
    match non_empty(raw) {
        Some(v) => v
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                var,
                reason: "expected u16 (0..=65535)",
            }),
        None => Ok(None),
    }
}

/// Interprets a flag the lenient way: only `true` (any case) is true.
/// Unset/blank falls back to `default`.
pub fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match non_empty(raw) {
        Some(v) => v.eq_ignore_ascii_case("true"),
        None => default,
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] otherwise.
pub fn validate_http_endpoint(
    var: &'static str,
    value: &str,
) -> std::result::Result<(), ConfigError> {
    let value = value.trim();
    let has_host = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}
