use serde::Serialize;

/// Success body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Model reply.
    pub response: String,
    /// Always `"success"`.
    pub status: &'static str,
    /// Model that produced the reply.
    pub model: String,
}

impl ChatResponse {
    pub fn success(response: String, model: impl Into<String>) -> Self {
        Self {
            response,
            status: "success",
            model: model.into(),
        }
    }
}
