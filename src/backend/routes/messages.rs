//! Message Handlers
//!
//! HTTP handler for sending a message. The send path is the head of the
//! delivery pipeline: persist through the message service, then hand the
//! result to the hub for best-effort live delivery.
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::model::Message;

/// Request body for `POST /api/v1/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub recipient_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub idempotency_key: String,
}

/// Send a message (POST /api/v1/messages).
///
/// Responds 201 with the stored message. A repeated idempotency key
/// returns the original message, also as 201. Live delivery to the
/// recipient happens asynchronously and does not affect the response.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state
        .messages
        .send_message(
            &request.sender_id,
            &request.recipient_id,
            &request.content,
            &request.idempotency_key,
        )
        .await?;

    // Best effort: if the recipient has no live session this is a no-op.
    state.hub.broadcast(message.clone(), &request.recipient_id).await;

    Ok((StatusCode::CREATED, Json(message)))
}
