//! User Handlers
//!
//! HTTP handlers for the user directory endpoints.
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::store::UserStore;
use crate::shared::model::User;

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
}

/// Create a user (POST /api/v1/users).
pub async fn create_user(
    State(users): State<UserStore>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = users.create(&request.username).await?;
    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch a user by id (GET /api/v1/users/{id}).
pub async fn get_user(
    State(users): State<UserStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(users.find_by_id(id).await?))
}

/// Query parameters for `GET /api/v1/users`.
#[derive(Debug, Deserialize)]
pub struct FindUserQuery {
    pub username: Option<String>,
}

/// Look up a user by username (GET /api/v1/users?username=).
pub async fn find_user(
    State(users): State<UserStore>,
    Query(query): Query<FindUserQuery>,
) -> Result<Json<User>, ApiError> {
    let username = query
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("username parameter is required"))?;

    Ok(Json(users.find_by_username(&username).await?))
}
