//! Hub Module
//!
//! Real-time delivery for the chat backend: the connection registry
//! (single-owner event loop over the user -> live session map) and the
//! per-connection reader/writer tasks that bridge a session to its
//! websocket.

/// Connection registry event loop
pub mod registry;

/// Per-connection reader/writer tasks
pub mod session;

pub use registry::{Hub, HubEvent, HubHandle, Session, OUTBOUND_QUEUE_CAPACITY};
