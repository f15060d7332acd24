//! Routes Module
//!
//! HTTP route configuration and the handlers behind each endpoint.

/// Chat and message listing handlers
pub mod chats;

/// Message sending handler
pub mod messages;

/// Router assembly
pub mod router;

/// User directory handlers
pub mod users;

/// Websocket upgrade handler
pub mod ws;

pub use router::create_router;
