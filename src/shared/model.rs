/**
 * Domain Model
 *
 * This module defines the core data structures for the 1:1 chat system:
 * users, chats, messages, and message delivery status.
 *
 * All types are serialized to/from JSON for communication over HTTP and
 * the websocket delivery path. The JSON field names form the wire format
 * of the API and must stay stable.
 *
 * # Ownership
 *
 * - A `Chat` binds exactly one unordered pair of user ids for its lifetime.
 * - A `Message` belongs to exactly one chat; content and sender are fixed
 *   at creation, only `status` changes afterwards.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An application user.
///
/// The messaging core only ever treats user ids as opaque tokens; this
/// struct exists for the user directory endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and the current timestamp.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}

/// A 1:1 conversation between two fixed participants.
///
/// At most one chat exists per unordered participant pair; the store
/// enforces this. `updated_at` advances on every appended message and
/// drives the most-recent-first ordering of chat listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: Uuid,
    /// User id of the first participant (as given at creation).
    pub participant1: String,
    /// User id of the second participant.
    pub participant2: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn new(participant1: impl Into<String>, participant2: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            participant1: participant1.into(),
            participant2: participant2.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given user id is one of the two participants.
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participant1 == user_id || self.participant2 == user_id
    }
}

/// Delivery status of a message.
///
/// Transitions are forward-only: `sent -> delivered -> read`. The derived
/// ordering is what the store uses to reject regressions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

/// A single message inside a chat.
///
/// This struct is also the broadcast wire format: when a message is
/// delivered over a live websocket connection, the payload is exactly
/// this struct serialized to JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: String,
    pub content: String,
    pub status: MessageStatus,
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied dedupe token, unique within the chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl Message {
    /// Create a new message in `sent` status with the current timestamp.
    ///
    /// An empty idempotency key is normalized to `None` so that "no key"
    /// never participates in dedupe lookups.
    pub fn new(
        chat_id: Uuid,
        sender_id: impl Into<String>,
        content: impl Into<String>,
        idempotency_key: impl Into<String>,
    ) -> Self {
        let key = idempotency_key.into();
        Self {
            id: Uuid::new_v4(),
            chat_id,
            sender_id: sender_id.into(),
            content: content.into(),
            status: MessageStatus::Sent,
            timestamp: Utc::now(),
            idempotency_key: if key.is_empty() { None } else { Some(key) },
        }
    }
}
