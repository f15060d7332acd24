//! Websocket Handler
//!
//! Upgrades `GET /ws?user_id=` to a live delivery connection. After the
//! upgrade the socket is split in two: the write half drains the
//! session's outbound queue, the read half consumes inbound frames.
//! Registration goes through the hub, which evicts any previous session
//! for the same user id.
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::backend::error::ApiError;
use crate::backend::hub::{session, Session, OUTBOUND_QUEUE_CAPACITY};
use crate::backend::server::state::AppState;

/// Query parameters for `GET /ws`.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub user_id: Option<String>,
}

/// Upgrade to a websocket and register a live session (GET /ws).
pub async fn websocket(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("user_id parameter is required"))?;

    Ok(ws.on_upgrade(move |socket| connect_session(socket, state, user_id)))
}

/// Register the session and start its reader/writer tasks.
async fn connect_session(socket: WebSocket, state: AppState, user_id: String) {
    let (wire_tx, wire_rx) = socket.split();
    let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);

    let live = Session::new(user_id.clone(), outbound_tx);
    let session_id = live.id;
    tracing::info!("[WS] Connection for {user_id}, session {session_id}");
    state.hub.register(live).await;

    tokio::spawn(session::run_writer(wire_tx, outbound_rx));
    tokio::spawn(session::run_reader(
        wire_rx,
        state.hub.clone(),
        state.messages.clone(),
        user_id,
        session_id,
    ));
}
