//! Chat Listing Handlers
//!
//! HTTP handlers for the paginated chat and message listings.
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::service::MessageService;
use crate::shared::model::{Chat, Message};
use crate::shared::pagination::{PageParams, PaginatedResponse};

/// Query parameters for `GET /api/v1/chats`.
#[derive(Debug, Deserialize)]
pub struct ListChatsQuery {
    pub user_id: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Query parameters for `GET /api/v1/chats/{chat_id}/messages`.
#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// List a user's chats, most recently active first (GET /api/v1/chats).
pub async fn list_user_chats(
    State(messages): State<MessageService>,
    Query(query): Query<ListChatsQuery>,
) -> Result<Json<PaginatedResponse<Chat>>, ApiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("user_id parameter is required"))?;

    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };
    Ok(Json(messages.get_user_chats(&user_id, params).await))
}

/// List a chat's messages in chronological order
/// (GET /api/v1/chats/{chat_id}/messages).
pub async fn list_chat_messages(
    State(messages): State<MessageService>,
    Path(chat_id): Path<Uuid>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<PaginatedResponse<Message>>, ApiError> {
    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };
    Ok(Json(messages.get_chat_messages(chat_id, params).await?))
}
