/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * Every field is a clonable handle over shared state:
 * - the stores wrap `Arc<RwLock<_>>` for concurrent access
 * - the hub handle is an mpsc sender into the single event loop
 *
 * The `FromRef` implementations let handlers extract only the part of
 * the state they use, following Axum's recommended pattern.
 */
use axum::extract::FromRef;

use crate::backend::hub::HubHandle;
use crate::backend::service::MessageService;
use crate::backend::store::{ChatStore, UserStore};

/// Central state container for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// User directory
    pub users: UserStore,
    /// Chat and message storage
    pub chats: ChatStore,
    /// Messaging business rules
    pub messages: MessageService,
    /// Producer handle into the connection hub event loop
    pub hub: HubHandle,
}

impl FromRef<AppState> for UserStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for ChatStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chats.clone()
    }
}

impl FromRef<AppState> for MessageService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.messages.clone()
    }
}

impl FromRef<AppState> for HubHandle {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}
