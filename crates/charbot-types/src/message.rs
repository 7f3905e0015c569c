//! Transcript message types for CharBot.
//!
//! A [`Message`] is one turn in the conversation. Messages are created once
//! and never modified; the transcript only grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Delivery status of a message.
///
/// `Error` is only ever set on assistant messages synthesized locally to
/// report a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Ok,
    Error,
}

/// A single message in the conversation transcript.
///
/// `id` is a UUIDv7, so ids sort in creation order within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
}

impl Message {
    fn new(sender: Sender, status: MessageStatus, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            status,
        }
    }

    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageStatus::Ok, text)
    }

    /// A successful assistant reply (or the session greeting).
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageStatus::Ok, text)
    }

    /// An assistant-authored message reporting a failed exchange.
    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageStatus::Error, text)
    }

    pub fn is_error(&self) -> bool {
        self.status == MessageStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_wire_names() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
        assert!(serde_json::from_str::<Sender>("\"system\"").is_err());
    }

    #[test]
    fn test_constructors_set_sender_and_status() {
        let user = Message::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.status, MessageStatus::Ok);

        let reply = Message::assistant("hello");
        assert_eq!(reply.sender, Sender::Assistant);
        assert!(!reply.is_error());

        let failure = Message::assistant_error("oops");
        assert_eq!(failure.sender, Sender::Assistant);
        assert!(failure.is_error());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let first = Message::user("a");
        let second = Message::user("b");
        assert_ne!(first.id, second.id);
        assert!(first.id < second.id);
    }

    #[test]
    fn test_message_serialize() {
        let msg = Message::assistant_error("boom");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sender\":\"assistant\""));
        assert!(json.contains("\"status\":\"error\""));
    }
}
