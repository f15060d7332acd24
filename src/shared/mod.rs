//! Shared Module
//!
//! Types shared between the server and any client of the API: the domain
//! model, the error taxonomy, pagination envelopes, and websocket frame
//! shapes. Everything here is plain data designed for JSON serialization;
//! no server state lives in this module.

/// Core domain model (users, chats, messages)
pub mod model;

/// Domain error taxonomy
pub mod error;

/// Pagination parameters and response envelope
pub mod pagination;

/// Websocket frame envelopes
pub mod frame;

/// Re-export commonly used types for convenience
pub use error::DomainError;
pub use frame::InboundFrame;
pub use model::{Chat, Message, MessageStatus, User};
pub use pagination::{PageParams, PaginatedResponse};
