/**
 * Message Service
 *
 * Business-rule layer over the chat store. Validates send requests,
 * orchestrates find-or-create-chat plus idempotent append, and exposes
 * the paginated read paths the HTTP layer serves.
 *
 * Validation happens before any store call, so a rejected request leaves
 * no partial state behind — no chat is created for an invalid send.
 *
 * Note that the message path deliberately performs no user-existence
 * check: sending to an id the user directory has never seen still
 * succeeds and creates a chat. Callers own that policy.
 */
use uuid::Uuid;

use crate::backend::store::ChatStore;
use crate::shared::error::DomainError;
use crate::shared::model::{Chat, Message, MessageStatus};
use crate::shared::pagination::{PageParams, PaginatedResponse};

/// Clonable message-service handle; shares the underlying store.
#[derive(Debug, Clone)]
pub struct MessageService {
    store: ChatStore,
}

impl MessageService {
    pub fn new(store: ChatStore) -> Self {
        Self { store }
    }

    /// Send a message from `sender_id` to `recipient_id`.
    ///
    /// Returns the created message, or — when `idempotency_key` matches
    /// an earlier send in the same chat — the original message, which is
    /// indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// * `InvalidUser` - either id is empty
    /// * `CannotMessageSelf` - sender and recipient are the same
    /// * `EmptyMessage` - content is empty
    pub async fn send_message(
        &self,
        sender_id: &str,
        recipient_id: &str,
        content: &str,
        idempotency_key: &str,
    ) -> Result<Message, DomainError> {
        if sender_id.is_empty() || recipient_id.is_empty() {
            return Err(DomainError::InvalidUser);
        }
        if sender_id == recipient_id {
            return Err(DomainError::CannotMessageSelf);
        }
        if content.is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        let chat = self.store.find_or_create_chat(sender_id, recipient_id).await?;
        self.store
            .append_message(chat.id, sender_id, content, idempotency_key)
            .await
    }

    /// Advance a message's delivery status.
    ///
    /// Trusted-internal entry point used by the hub's delivery path and
    /// by inbound read-receipt frames; it is never routed to an external
    /// client directly.
    pub async fn update_message_status(
        &self,
        message_id: Uuid,
        status: MessageStatus,
    ) -> Result<(), DomainError> {
        self.store.update_status(message_id, status).await
    }

    /// List a user's chats, most recently active first.
    pub async fn get_user_chats(
        &self,
        user_id: &str,
        params: PageParams,
    ) -> PaginatedResponse<Chat> {
        self.store.list_chats_for_user(user_id, params).await
    }

    /// List a chat's messages in chronological order.
    pub async fn get_chat_messages(
        &self,
        chat_id: Uuid,
        params: PageParams,
    ) -> Result<PaginatedResponse<Message>, DomainError> {
        self.store.list_messages(chat_id, params).await
    }
}
