//! chatrelay - Main Library
//!
//! A minimal real-time 1:1 chat backend. Users exchange messages over a
//! JSON HTTP API; currently-connected users also receive live delivery
//! over a websocket.
//!
//! # Module Structure
//!
//! - **`shared`** - Serializable types usable by any client: the domain
//!   model, error taxonomy, pagination envelopes, and websocket frames.
//! - **`backend`** - The server: Axum routes, in-memory stores, the
//!   message service, and the connection hub that fans messages out to
//!   at most one live session per user.
//!
//! # Delivery Model
//!
//! Delivery is best-effort: a message to a user without a live session
//! stays in `sent` status until that user fetches it over the API.
//! Nothing is persisted across restarts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatrelay::backend::server::create_app;
//!
//! # async fn example() {
//! let app = create_app();
//! // Serve `app` with axum
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
