//! Chat message types.

use serde::{Deserialize, Serialize};

/// Represents the originator of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// System-generated message (greetings, notices).
    System,
    /// Message typed by the user.
    User,
    /// Message produced by the remote assistant.
    Assistant,
}

/// A single message in the chat transcript.
///
/// `pending` marks an assistant placeholder still awaiting the remote
/// response. At most one pending assistant message exists per transcript;
/// it is created together with the user turn it answers and replaced in
/// place on resolution, never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub pending: bool,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::System,
            text: text.into(),
            pending: false,
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            pending: false,
        }
    }

    /// Creates a resolved assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            pending: false,
        }
    }

    /// Creates the placeholder for an assistant response in flight.
    pub fn pending_assistant() -> Self {
        Self {
            sender: Sender::Assistant,
            text: String::new(),
            pending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        let msg = ChatMessage::user("Ciao");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""sender":"user""#));
    }

    #[test]
    fn pending_defaults_to_false_on_deserialize() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"sender":"assistant","text":"Salve"}"#).unwrap();
        assert!(!msg.pending);
        assert_eq!(msg.sender, Sender::Assistant);
    }
}
