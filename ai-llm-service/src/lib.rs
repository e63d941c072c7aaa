//! Shared client for a local Ollama backend.
//!
//! - [`services::ollama_service::OllamaService`]: probe, model listing, chat completions
//! - [`config`]: backend config and its environment loader
//! - [`error_handler`]: unified errors ([`error_handler::AiLlmError`], [`error_handler::UpstreamError`])
//! - [`telemetry`]: tracing layer and filter helpers for the binary
//! - [`types`]: chat message wire types

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;
pub mod types;
