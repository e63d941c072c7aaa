//! Thin client for the local Ollama API.
//!
//! Endpoints used:
//! - `GET  {endpoint}/api/tags`            : connectivity probe and model listing
//! - `POST {endpoint}/v1/chat/completions` : OpenAI-compatible chat completion (`stream=false`)
//!
//! Every call carries its own timeout (probe 5s, listing 10s, completion 60s by
//! default). The `try_*` methods return a detailed [`UpstreamError`]; the
//! public convenience methods ([`OllamaService::probe`],
//! [`OllamaService::chat_completion`]) log that detail and fold it into a
//! plain `bool` / `Option`.
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::config::ollama_config::OllamaConfig;
//! use ai_llm_service::services::ollama_service::OllamaService;
//! use ai_llm_service::types::ChatMessage;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = OllamaService::new(OllamaConfig::default())?;
//!
//! if svc.probe().await {
//!     let reply = svc
//!         .chat_completion("gemma3:1b", &[ChatMessage::user("Write a haiku about Rust.")])
//!         .await;
//!     println!("{reply:?}");
//! }
//! # Ok(()) }
//! ```

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::ollama_config::OllamaConfig,
    error_handler::{AiLlmError, HttpError, UpstreamError, make_snippet},
    types::ChatMessage,
};

/// Client for one Ollama backend.
///
/// Holds a pooled `reqwest::Client`; cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: OllamaConfig,
    url_tags: String,
    url_chat: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] if the endpoint or model is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: OllamaConfig) -> Result<Self, AiLlmError> {
        cfg.validate()?;

        let client = reqwest::Client::builder().build()?;

        let base = cfg.base_url().to_string();
        let url_tags = format!("{base}/api/tags");
        let url_chat = format!("{base}/v1/chat/completions");

        info!(
            endpoint = %cfg.endpoint,
            model = %cfg.model,
            chat_timeout_secs = cfg.chat_timeout_secs,
            "OllamaService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_tags,
            url_chat,
        })
    }

    /// Connectivity probe: `true` only when `/api/tags` answers HTTP 200.
    ///
    /// Never fails; the reason of a negative answer is logged.
    pub async fn probe(&self) -> bool {
        match self.try_probe().await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    endpoint = %self.cfg.endpoint,
                    kind = err.kind(),
                    error = %err,
                    "Ollama probe failed"
                );
                false
            }
        }
    }

    /// Strict probe. The response body is not inspected.
    ///
    /// # Errors
    /// - [`UpstreamError::Timeout`] / [`UpstreamError::Connect`] / [`UpstreamError::Transport`]
    /// - [`UpstreamError::HttpStatus`] for anything but 200
    #[instrument(skip_all, fields(endpoint = %self.cfg.endpoint))]
    pub async fn try_probe(&self) -> Result<(), UpstreamError> {
        let timeout = self.cfg.probe_timeout();
        debug!("GET {}", self.url_tags);

        let resp = self.get_tags(timeout).await?;
        if resp.status() != StatusCode::OK {
            return Err(Self::status_error(resp, &self.url_tags).await);
        }
        Ok(())
    }

    /// Fetches `/api/tags` and returns the body untouched.
    ///
    /// # Errors
    /// - transport variants of [`UpstreamError`] on network failures
    /// - [`UpstreamError::HttpStatus`] for anything but 200
    #[instrument(skip_all, fields(endpoint = %self.cfg.endpoint))]
    pub async fn list_models(&self) -> Result<Vec<u8>, UpstreamError> {
        let timeout = self.cfg.list_timeout();
        debug!("GET {}", self.url_tags);

        let resp = self.get_tags(timeout).await?;
        if resp.status() != StatusCode::OK {
            let err = Self::status_error(resp, &self.url_tags).await;
            error!(error = %err, "GET /api/tags returned non-success status");
            return Err(err);
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, &self.url_tags, timeout))?;
        Ok(body.to_vec())
    }

    /// Performs a non-streaming chat completion and returns the reply text.
    ///
    /// Returns `None` for every failure (bad status, malformed body,
    /// transport error); the concrete reason is logged.
    pub async fn chat_completion(&self, model: &str, messages: &[ChatMessage]) -> Option<String> {
        match self.try_chat_completion(model, messages).await {
            Ok(text) => Some(text),
            Err(err) => {
                error!(
                    model,
                    kind = err.kind(),
                    error = %err,
                    "chat completion failed"
                );
                None
            }
        }
    }

    /// Strict chat completion via `/v1/chat/completions`.
    ///
    /// Body: `{model, messages, stream: false, options: {temperature, max_tokens}}`.
    /// The reply is `choices[0].message.content`.
    ///
    /// # Errors
    /// - transport variants of [`UpstreamError`] on network failures
    /// - [`UpstreamError::HttpStatus`] for anything but 200
    /// - [`UpstreamError::Decode`] if the JSON cannot be parsed
    /// - [`UpstreamError::EmptyChoices`] if there is no first choice content
    #[instrument(skip_all, fields(model = %model, messages = messages.len()))]
    pub async fn try_chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, UpstreamError> {
        let started = Instant::now();
        let timeout = self.cfg.chat_timeout();
        let body = ChatCompletionRequest {
            model,
            messages,
            stream: false,
            options: CompletionOptions {
                temperature: self.cfg.temperature,
                max_tokens: self.cfg.max_tokens,
            },
        };

        debug!("POST {}", self.url_chat);
        let resp = self
            .client
            .post(&self.url_chat)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, &self.url_chat, timeout))?;

        if resp.status() != StatusCode::OK {
            return Err(Self::status_error(resp, &self.url_chat).await);
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            UpstreamError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        let content = out
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(UpstreamError::EmptyChoices)?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            reply_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }

    /* --------------------- Internals --------------------- */

    async fn get_tags(&self, timeout: Duration) -> Result<reqwest::Response, UpstreamError> {
        self.client
            .get(&self.url_tags)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, &self.url_tags, timeout))
    }

    async fn status_error(resp: reqwest::Response, url: &str) -> UpstreamError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        UpstreamError::HttpStatus(HttpError {
            status,
            url: url.to_string(),
            snippet: make_snippet(&text),
        })
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: CompletionOptions,
}

#[derive(Debug, Serialize)]
struct CompletionOptions {
    temperature: f32,
    max_tokens: u32,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn service_for(endpoint: &str) -> OllamaService {
        OllamaService::new(OllamaConfig {
            endpoint: endpoint.to_string(),
            ..OllamaConfig::default()
        })
        .unwrap()
    }

    /// Base URL of a local port nobody listens on.
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let res = OllamaService::new(OllamaConfig {
            endpoint: "localhost:11434".into(),
            ..OllamaConfig::default()
        });
        assert!(matches!(res, Err(AiLlmError::Config(_))));
    }

    #[tokio::test]
    async fn probe_is_true_on_200() {
        let mut server = mockito::Server::new_async().await;
        let tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(r#"{"models":[]}"#)
            .create_async()
            .await;

        assert!(service_for(&server.url()).probe().await);
        tags.assert_async().await;
    }

    #[tokio::test]
    async fn probe_is_false_on_other_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(500)
            .create_async()
            .await;

        let svc = service_for(&server.url());
        assert!(!svc.probe().await);
        assert!(matches!(
            svc.try_probe().await,
            Err(UpstreamError::HttpStatus(HttpError { status, .. })) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn probe_is_false_when_unreachable() {
        let svc = service_for(&closed_port_url());
        assert!(!svc.probe().await);

        let err = svc.try_probe().await.unwrap_err();
        assert!(
            matches!(err, UpstreamError::Connect { .. }),
            "unexpected error: {err}"
        );
        assert_eq!(err.kind(), "connection_refused");
    }

    #[tokio::test]
    async fn list_models_returns_body_verbatim() {
        let body = r#"{"models":[{"name":"gemma3:1b","size":815319791}]}"#;
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let bytes = service_for(&server.url()).list_models().await.unwrap();
        assert_eq!(bytes, body.as_bytes());
    }

    #[tokio::test]
    async fn list_models_fails_on_non_200() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let err = service_for(&server.url()).list_models().await.unwrap_err();
        assert_eq!(err.kind(), "bad_status");
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn chat_completion_sends_expected_body_and_extracts_content() {
        let mut server = mockito::Server::new_async().await;
        let completion = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Json(json!({
                "model": "gemma3:1b",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                    {"role": "user", "content": "how are you?"}
                ],
                "stream": false,
                "options": {"temperature": 0.7, "max_tokens": 2000}
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"fine"}},{"message":{"content":"second"}}]}"#)
            .create_async()
            .await;

        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("how are you?"),
        ];
        let reply = service_for(&server.url())
            .chat_completion("gemma3:1b", &messages)
            .await;

        assert_eq!(reply.as_deref(), Some("fine"));
        completion.assert_async().await;
    }

    #[tokio::test]
    async fn chat_completion_failures_are_classified() {
        let mut server = mockito::Server::new_async().await;
        let svc = service_for(&server.url());
        let msgs = [ChatMessage::user("hi")];

        let m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;
        assert_eq!(
            svc.try_chat_completion("gemma3:1b", &msgs).await.unwrap_err().kind(),
            "bad_status"
        );
        assert_eq!(svc.chat_completion("gemma3:1b", &msgs).await, None);
        m.remove_async().await;

        let m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;
        assert_eq!(
            svc.try_chat_completion("gemma3:1b", &msgs).await.unwrap_err().kind(),
            "empty_choices"
        );
        m.remove_async().await;

        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"message":"not an openai payload"}"#)
            .create_async()
            .await;
        assert_eq!(
            svc.try_chat_completion("gemma3:1b", &msgs).await.unwrap_err().kind(),
            "malformed_body"
        );
    }

    #[tokio::test]
    async fn chat_completion_is_none_when_unreachable() {
        let svc = service_for(&closed_port_url());
        assert_eq!(
            svc.chat_completion("gemma3:1b", &[ChatMessage::user("hi")]).await,
            None
        );
    }
}
