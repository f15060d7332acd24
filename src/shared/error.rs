//! Domain Error Types
//!
//! This module defines the error taxonomy shared by the store, the message
//! service, and the HTTP layer.
//!
//! # Error Categories
//!
//! - Validation errors (`InvalidUser`, `CannotMessageSelf`, `EmptyMessage`,
//!   `InvalidUsername`) — rejected before any state mutation.
//! - Not-found errors (`UserNotFound`, `ChatNotFound`, `MessageNotFound`).
//! - Conflicts (`UsernameExists`).
//!
//! Transport failures and queue saturation are deliberately absent here:
//! those are resolved inside the connection hub and never surface to a
//! caller.
use thiserror::Error;

/// Errors produced by the chat domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A sender or recipient id was empty.
    #[error("invalid user")]
    InvalidUser,

    /// Sender and recipient are the same user.
    #[error("cannot send a message to yourself")]
    CannotMessageSelf,

    /// Message content was empty.
    #[error("message content cannot be empty")]
    EmptyMessage,

    /// Username was empty when creating a user.
    #[error("username is required")]
    InvalidUsername,

    #[error("user not found")]
    UserNotFound,

    #[error("chat not found")]
    ChatNotFound,

    #[error("message not found")]
    MessageNotFound,

    #[error("username already exists")]
    UsernameExists,
}

impl DomainError {
    /// Whether this error is a pre-state validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidUser | Self::CannotMessageSelf | Self::EmptyMessage | Self::InvalidUsername
        )
    }
}
