use serde::Serialize;

/// Backend reachability as reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OllamaStatus {
    Connected,
    Disconnected,
}

impl From<bool> for OllamaStatus {
    fn from(reachable: bool) -> Self {
        if reachable {
            OllamaStatus::Connected
        } else {
            OllamaStatus::Disconnected
        }
    }
}

/// Response body for `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"running"`: if this is served, the server is up.
    pub server: &'static str,
    pub ollama: OllamaStatus,
    pub model: String,
    pub ollama_url: String,
    /// RFC3339 UTC time of the check.
    pub timestamp: String,
}
