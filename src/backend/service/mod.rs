//! Service Module
//!
//! Business-rule layer between the HTTP handlers and the stores.

/// Message sending and status orchestration
pub mod message_service;

pub use message_service::MessageService;
