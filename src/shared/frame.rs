//! Websocket Frame Envelopes
//!
//! Typed envelopes for inbound frames on a live connection. The only
//! recognized inbound frame is a read receipt; anything that fails to
//! parse as one of these shapes is ignored by the reader task.
use serde::Deserialize;
use uuid::Uuid;

/// An inbound frame from a connected client, discriminated by `type`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundFrame {
    /// Client confirms it has read a message.
    MarkRead { message_id: Uuid },
}
