//! Backend Module
//!
//! All server-side code for the chat backend: an Axum HTTP API, the
//! in-memory stores, the message service, and the websocket delivery
//! pipeline.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and handlers
//! - **`store`** - In-memory chat/message and user storage
//! - **`service`** - Messaging business rules
//! - **`hub`** - Connection registry and per-connection session tasks
//! - **`error`** - HTTP-facing error types
//!
//! # Delivery Pipeline
//!
//! An inbound send-message request flows:
//!
//! ```text
//! routes::messages -> service -> store       (validate, dedupe, append)
//!                  -> hub                    (broadcast event)
//!                  -> session writer task    (outbound queue -> wire)
//! ```
//!
//! Inbound read receipts flow the opposite way: the session reader task
//! feeds the service's status-update entry point.
//!
//! # State Management
//!
//! Stores are clonable handles over `Arc<RwLock<_>>` with reader/writer
//! discipline. The hub's session map is not locked at all: one event
//! loop owns it exclusively and everything else enqueues events.

/// HTTP-facing error types
pub mod error;

/// Connection registry and session tasks
pub mod hub;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

/// Messaging business rules
pub mod service;

/// In-memory storage
pub mod store;

/// Re-export commonly used types
pub use error::ApiError;
pub use hub::{Hub, HubHandle};
pub use server::{create_app, AppState, ServerConfig};
pub use service::MessageService;
pub use store::{ChatStore, UserStore};
