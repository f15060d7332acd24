//! User Store
//!
//! In-memory user directory backing the user CRUD endpoints. The message
//! path never consults it; user ids are opaque tokens there.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::error::DomainError;
use crate::shared::model::User;

/// Clonable handle to the shared in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with a fresh id.
    ///
    /// Usernames are unique; the uniqueness check and insert share one
    /// write lock.
    pub async fn create(&self, username: &str) -> Result<User, DomainError> {
        if username.is_empty() {
            return Err(DomainError::InvalidUsername);
        }

        let mut users = self.inner.write().await;
        if users.values().any(|u| u.username == username) {
            return Err(DomainError::UsernameExists);
        }

        let user = User::new(username);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        let users = self.inner.read().await;
        users.get(&id).cloned().ok_or(DomainError::UserNotFound)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        let users = self.inner.read().await;
        users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }
}
