/**
 * Router Assembly
 *
 * Builds the application router:
 *
 * # Routes
 *
 * ## API
 * - `POST /api/v1/users` - Create user
 * - `GET  /api/v1/users` - Look up a user by username
 * - `GET  /api/v1/users/{id}` - Fetch user
 * - `GET  /api/v1/chats` - List a user's chats
 * - `GET  /api/v1/chats/{chat_id}/messages` - List chat messages
 * - `POST /api/v1/messages` - Send a message
 *
 * ## Realtime
 * - `GET /ws` - Websocket upgrade for live delivery
 *
 * ## Operational
 * - `GET /health` - Liveness probe
 */
use axum::{
    routing::{any, get, post},
    Json, Router,
};

use crate::backend::routes::{chats, messages, users, ws};
use crate::backend::server::state::AppState;

/// Configure all routes over the application state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/users", post(users::create_user).get(users::find_user))
        .route("/api/v1/users/{id}", get(users::get_user))
        .route("/api/v1/chats", get(chats::list_user_chats))
        .route("/api/v1/chats/{chat_id}/messages", get(chats::list_chat_messages))
        .route("/api/v1/messages", post(messages::send_message))
        .route("/ws", any(ws::websocket))
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness probe (GET /health).
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
