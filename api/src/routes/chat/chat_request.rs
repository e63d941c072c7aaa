use ai_llm_service::types::ChatMessage;
use serde::Deserialize;
use thiserror::Error;

/// Request payload for `POST /api/chat`.
///
/// Both fields are optional at the wire level so that a missing message
/// can be reported precisely by [`ChatRequest::validate`].
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Text the user just typed.
    #[serde(default)]
    pub message: Option<String>,
    /// Prior turns kept by the client. Checked for shape only.
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

/// Why a chat payload was refused. `Display` is the client-facing `error` text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No message provided")]
    MissingMessage,

    #[error("Empty message")]
    EmptyMessage,

    /// Not JSON, or `message`/`history` of the wrong type.
    #[error("Invalid request body")]
    MalformedBody,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidChat {
    /// Message with surrounding whitespace removed.
    pub message: String,
    pub history: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Checks the message; history passes through untouched.
    pub fn validate(self) -> Result<ValidChat, ValidationError> {
        let message = self.message.ok_or(ValidationError::MissingMessage)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        Ok(ValidChat {
            message: message.to_string(),
            history: self.history.unwrap_or_default(),
        })
    }
}

impl ValidChat {
    /// Conversation to send upstream.
    ///
    /// A non-empty history is used as-is: the client already appended the new
    /// user turn to it. Otherwise the message becomes a single user turn.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        if self.history.is_empty() {
            vec![ChatMessage::user(self.message)]
        } else {
            self.history
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<ValidChat, ValidationError> {
        serde_json::from_str::<ChatRequest>(raw)
            .map_err(|_| ValidationError::MalformedBody)?
            .validate()
    }

    #[test]
    fn missing_or_null_message() {
        assert_eq!(parse("{}"), Err(ValidationError::MissingMessage));
        assert_eq!(parse(r#"{"message": null}"#), Err(ValidationError::MissingMessage));
        assert_eq!(
            parse(r#"{"history": [{"role": "user", "content": "hi"}]}"#),
            Err(ValidationError::MissingMessage)
        );
    }

    #[test]
    fn blank_message() {
        assert_eq!(parse(r#"{"message": ""}"#), Err(ValidationError::EmptyMessage));
        assert_eq!(parse(r#"{"message": " \n\t "}"#), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn wrong_shapes_are_malformed() {
        assert_eq!(parse(r#"{"message": 42}"#), Err(ValidationError::MalformedBody));
        assert_eq!(
            parse(r#"{"message": "hi", "history": "nope"}"#),
            Err(ValidationError::MalformedBody)
        );
        assert_eq!(
            parse(r#"{"message": "hi", "history": [{"role": "user"}]}"#),
            Err(ValidationError::MalformedBody)
        );
    }

    #[test]
    fn message_is_trimmed_and_wrapped_without_history() {
        let chat = parse(r#"{"message": "  hi  "}"#).unwrap();
        assert_eq!(chat.message, "hi");
        assert_eq!(chat.into_messages(), vec![ChatMessage::user("hi")]);

        let chat = parse(r#"{"message": "hi", "history": []}"#).unwrap();
        assert_eq!(chat.into_messages(), vec![ChatMessage::user("hi")]);
    }

    #[test]
    fn non_empty_history_is_forwarded_verbatim() {
        let chat = parse(
            r#"{"message": "second",
                "history": [
                    {"role": "user", "content": "first"},
                    {"role": "assistant", "content": "reply"},
                    {"role": "user", "content": "second"}
                ]}"#,
        )
        .unwrap();

        let messages = chat.into_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], ChatMessage::user("second"));
    }

    #[test]
    fn history_roles_are_not_checked_for_alternation() {
        let chat = parse(
            r#"{"message": "x",
                "history": [
                    {"role": "assistant", "content": "a"},
                    {"role": "assistant", "content": "b"}
                ]}"#,
        )
        .unwrap();
        assert_eq!(chat.into_messages(), vec![
            ChatMessage::assistant("a"),
            ChatMessage::assistant("b"),
        ]);
    }
}
