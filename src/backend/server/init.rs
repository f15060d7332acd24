/**
 * Server Initialization
 *
 * Wires the application together:
 * 1. Create the in-memory stores
 * 2. Create the message service over the chat store
 * 3. Create the connection hub and spawn its event loop
 * 4. Assemble `AppState` and the router
 *
 * The hub loop runs for the lifetime of the process; it exits only when
 * every `HubHandle` has been dropped.
 */
use axum::Router;

use crate::backend::hub::Hub;
use crate::backend::routes::create_router;
use crate::backend::server::state::AppState;
use crate::backend::service::MessageService;
use crate::backend::store::{ChatStore, UserStore};

/// Create and configure the Axum application.
pub fn create_app() -> Router {
    tracing::info!("Initializing chat backend");

    let users = UserStore::new();
    let chats = ChatStore::new();
    let messages = MessageService::new(chats.clone());

    let (hub, hub_handle) = Hub::new(messages.clone());
    tokio::spawn(hub.run());
    tracing::info!("Connection hub started");

    let state = AppState {
        users,
        chats,
        messages,
        hub: hub_handle,
    };

    create_router(state)
}
