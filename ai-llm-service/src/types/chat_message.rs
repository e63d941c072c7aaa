use serde::{Deserialize, Serialize};

/// Author of a chat turn, serialized in lowercase (`"user"`, `"assistant"`).
///
/// Caller history is only checked for shape, so any other role string is
/// kept in [`ChatRole::Other`] and forwarded to the backend as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    #[serde(untagged)]
    Other(String),
}

/// One conversation turn in OpenAI-compatible shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Wraps text typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Wraps a model reply.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}
