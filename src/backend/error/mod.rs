//! Backend Error Module
//!
//! HTTP-facing error types for the server.
//!
//! - **`types`** - Error type definitions and status-code mapping
//! - **`conversion`** - `IntoResponse` implementation

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
