//! Store Module
//!
//! In-memory storage for the chat backend. Both stores are clonable
//! handles over `Arc<RwLock<_>>` state: many readers, one writer, and
//! every multi-step mutation (find-or-create, dedupe-then-insert) runs
//! under a single write lock. Nothing here survives a restart.

/// Chat and message storage
pub mod chat_store;

/// User directory storage
pub mod user_store;

pub use chat_store::ChatStore;
pub use user_store::UserStore;
