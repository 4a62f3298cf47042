//! The active-session transcript and its mutation operations.

use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, Sender};

/// Greeting that opens every fresh transcript.
pub const WELCOME_MESSAGE: &str = "Benvenuto nella chat RAG!";

/// Ordered sequence of chat turns in the active session.
///
/// Ordering is monotonic by submission time: the user turn is appended
/// strictly before its paired placeholder, and resolution rewrites the
/// placeholder where it sits. Responses arriving late therefore never
/// reorder the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates a fresh transcript containing only the system greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::system(WELCOME_MESSAGE)],
        }
    }

    /// Restores a transcript from previously saved messages.
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// All messages, in submission order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends the user turn and its pending assistant placeholder as one
    /// operation, so no observer ever sees the turn without its placeholder.
    pub fn push_exchange(&mut self, prompt: impl Into<String>) {
        self.messages.push(ChatMessage::user(prompt));
        self.messages.push(ChatMessage::pending_assistant());
    }

    /// True while an assistant response is in flight.
    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(|m| m.pending)
    }

    /// Rewrites the most recent pending assistant entry in place.
    ///
    /// Scans from the end of the transcript rather than trusting a
    /// remembered index, so the resolution survives any transcript growth
    /// between dispatch and arrival. Returns false when no placeholder
    /// exists (a late or duplicate resolution is a no-op).
    pub fn resolve_pending(&mut self, text: impl Into<String>) -> bool {
        match self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.pending && m.sender == Sender::Assistant)
        {
            Some(placeholder) => {
                placeholder.text = text.into();
                placeholder.pending = false;
                true
            }
            None => false,
        }
    }

    /// Text of the first user turn, the source of the history preview.
    pub fn first_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.sender == Sender::User)
            .map(|m| m.text.as_str())
    }

    /// True when the transcript holds more than the opening greeting.
    pub fn has_conversation(&self) -> bool {
        self.messages.iter().any(|m| m.sender != Sender::System)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_transcript_greets() {
        let transcript = Transcript::new();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::System);
        assert_eq!(transcript.messages()[0].text, WELCOME_MESSAGE);
        assert!(!transcript.has_conversation());
    }

    #[test]
    fn exchange_appends_turn_then_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("Ciao");

        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "Ciao");
        assert_eq!(messages[2].sender, Sender::Assistant);
        assert!(messages[2].pending);
        assert!(transcript.has_pending());
    }

    #[test]
    fn resolve_rewrites_placeholder_in_place() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("Ciao");

        assert!(transcript.resolve_pending("Salve"));

        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].text, "Salve");
        assert!(!messages[2].pending);
        assert!(!transcript.has_pending());
    }

    #[test]
    fn resolve_without_placeholder_is_noop() {
        let mut transcript = Transcript::new();
        assert!(!transcript.resolve_pending("Salve"));
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn resolve_targets_most_recent_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_exchange("prima");
        transcript.resolve_pending("risposta");
        transcript.push_exchange("seconda");

        assert!(transcript.resolve_pending("ultima"));

        let messages = transcript.messages();
        assert_eq!(messages[2].text, "risposta");
        assert_eq!(messages[4].text, "ultima");
    }

    #[test]
    fn first_user_text_skips_greeting() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.first_user_text(), None);

        transcript.push_exchange("Ciao");
        transcript.push_exchange("Altro");
        assert_eq!(transcript.first_user_text(), Some("Ciao"));
    }
}
