//! Conversation turns and chat session types.
//!
//! Two views of a conversation live here:
//! - [`Turn`]: what is sent to the remote model (`user` / `model` roles with
//!   text parts), serialised exactly as the `generateContent` wire format.
//! - [`ChatSession`]: what the presentation layer shows the end user. The
//!   resolution pipeline never reads it; the front-end passes it in and gets a
//!   new value back after every exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a turn in a model prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (also used for synthetic instruction turns)
    User,
    /// The model
    Model,
}

/// A single text part of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One turn of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Turn {
    /// Create a user turn with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a model turn with a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Unique identifier for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who said a line in the chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// A line in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The transcript of one active chat.
///
/// Lives only as long as the front-end keeps it; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub messages: Vec<ChatMessage>,
    pub started_at: DateTime<Utc>,
}

impl ChatSession {
    /// Start an empty session.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            messages: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Return the session extended with one question/answer exchange.
    #[must_use]
    pub fn with_exchange(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::user(question));
        self.messages.push(ChatMessage::assistant(answer));
        self
    }

    /// Number of completed exchanges.
    pub fn exchanges(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.speaker == Speaker::Assistant)
            .count()
    }

    /// The most recent assistant answer, if any.
    pub fn last_answer(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.speaker == Speaker::Assistant)
            .map(|m| m.content.as_str())
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serializes_to_wire_shape() {
        let turn = Turn::model("Understood.");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "model", "parts": [{ "text": "Understood." }] })
        );
    }

    #[test]
    fn turn_text_joins_parts() {
        let turn = Turn {
            role: Role::User,
            parts: vec![Part { text: "a".into() }, Part { text: "b".into() }],
        };
        assert_eq!(turn.text(), "ab");
    }

    #[test]
    fn session_grows_by_exchange() {
        let session = ChatSession::new();
        let id = session.id.clone();

        let session = session
            .with_exchange("What are your hours?", "Open 365 days")
            .with_exchange("Phone?", "+91 91500 78405");

        assert_eq!(session.id, id);
        assert_eq!(session.messages.len(), 4);
        assert_eq!(session.exchanges(), 2);
        assert_eq!(session.last_answer(), Some("+91 91500 78405"));
        assert_eq!(session.messages[0].speaker, Speaker::User);
    }

    #[test]
    fn empty_session_has_no_answer() {
        let session = ChatSession::default();
        assert_eq!(session.exchanges(), 0);
        assert!(session.last_answer().is_none());
    }
}
