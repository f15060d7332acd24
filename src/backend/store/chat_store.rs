/**
 * Chat Store
 *
 * In-memory owner of all chat and message records. This is the only
 * component allowed to mutate chats and messages; everything else goes
 * through its methods.
 *
 * # Invariants
 *
 * - At most one chat exists per unordered pair of participants. The store
 *   keeps a normalized `(min, max)` pair index so `find_or_create_chat`
 *   resolves `(a, b)` and `(b, a)` to the same chat.
 * - Within one chat, message insertion order is chronological order.
 * - An idempotency key is unique within its chat: appending with a key
 *   that already exists returns the original message unchanged.
 * - Message status only moves forward (`sent -> delivered -> read`);
 *   regressions and repeats are silent no-ops.
 *
 * # Concurrency
 *
 * All state sits behind a single `tokio::sync::RwLock`. Writers take the
 * lock exclusively, which is what makes find-or-create and the
 * check-then-insert idempotency dedupe atomic; readers share the lock.
 */
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::error::DomainError;
use crate::shared::model::{Chat, Message, MessageStatus};
use crate::shared::pagination::{paginate, PageParams, PaginatedResponse};

/// Normalized key for the unordered participant pair.
fn pair_key(user_a: &str, user_b: &str) -> (String, String) {
    if user_a <= user_b {
        (user_a.to_string(), user_b.to_string())
    } else {
        (user_b.to_string(), user_a.to_string())
    }
}

#[derive(Debug, Default)]
struct ChatStoreInner {
    chats: HashMap<Uuid, Chat>,
    /// chat id -> messages in insertion order
    messages: HashMap<Uuid, Vec<Message>>,
    /// normalized participant pair -> chat id
    pairs: HashMap<(String, String), Uuid>,
}

/// Clonable handle to the shared in-memory chat store.
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    inner: Arc<RwLock<ChatStoreInner>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the chat for an unordered participant pair, creating it if
    /// none exists yet.
    ///
    /// Rejects self-pairs and empty ids. Concurrent calls with the same
    /// pair cannot create two chats: the lookup and insert happen under
    /// one write lock.
    pub async fn find_or_create_chat(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Chat, DomainError> {
        if user_a.is_empty() || user_b.is_empty() {
            return Err(DomainError::InvalidUser);
        }
        if user_a == user_b {
            return Err(DomainError::CannotMessageSelf);
        }

        let mut inner = self.inner.write().await;
        let key = pair_key(user_a, user_b);

        if let Some(chat_id) = inner.pairs.get(&key) {
            // Chats are never deleted, so the index entry is always live.
            let chat = inner.chats[chat_id].clone();
            return Ok(chat);
        }

        let chat = Chat::new(user_a, user_b);
        inner.pairs.insert(key, chat.id);
        inner.messages.insert(chat.id, Vec::new());
        inner.chats.insert(chat.id, chat.clone());

        tracing::debug!("[Store] Created chat {} ({} <-> {})", chat.id, user_a, user_b);
        Ok(chat)
    }

    /// Append a message to a chat, honoring the idempotency contract.
    ///
    /// If `idempotency_key` is non-empty and a message with that key
    /// already exists in the chat, the existing message is returned and
    /// nothing changes — no new row, no `updated_at` bump. Otherwise the
    /// message is created in `sent` status, appended in arrival order,
    /// and the chat's last-activity timestamp advances.
    pub async fn append_message(
        &self,
        chat_id: Uuid,
        sender_id: &str,
        content: &str,
        idempotency_key: &str,
    ) -> Result<Message, DomainError> {
        if content.is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        let mut inner = self.inner.write().await;
        if !inner.chats.contains_key(&chat_id) {
            return Err(DomainError::ChatNotFound);
        }

        // Dedupe check and insert stay under the same write lock so two
        // concurrent sends with the same key cannot both create a message.
        if !idempotency_key.is_empty() {
            if let Some(existing) = inner
                .messages
                .get(&chat_id)
                .and_then(|msgs| find_by_key(msgs, idempotency_key))
            {
                tracing::debug!(
                    "[Store] Idempotent replay of message {} (key {})",
                    existing.id,
                    idempotency_key
                );
                return Ok(existing);
            }
        }

        let message = Message::new(chat_id, sender_id, content, idempotency_key);
        if let Some(chat) = inner.chats.get_mut(&chat_id) {
            chat.updated_at = message.timestamp;
        }
        inner
            .messages
            .get_mut(&chat_id)
            .ok_or(DomainError::ChatNotFound)?
            .push(message.clone());

        Ok(message)
    }

    /// Advance a message's delivery status.
    ///
    /// Transitions are forward-only: a target status at or below the
    /// current one leaves the message untouched and reports success, so
    /// repeated updates and stale callers are both harmless. Fails only
    /// when no message with the given id exists.
    pub async fn update_status(
        &self,
        message_id: Uuid,
        status: MessageStatus,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        for messages in inner.messages.values_mut() {
            if let Some(message) = messages.iter_mut().find(|m| m.id == message_id) {
                if status > message.status {
                    message.status = status;
                }
                return Ok(());
            }
        }
        Err(DomainError::MessageNotFound)
    }

    /// List a user's chats, most recently active first.
    pub async fn list_chats_for_user(
        &self,
        user_id: &str,
        params: PageParams,
    ) -> PaginatedResponse<Chat> {
        let inner = self.inner.read().await;
        let mut chats: Vec<Chat> = inner
            .chats
            .values()
            .filter(|chat| chat.has_participant(user_id))
            .cloned()
            .collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        paginate(chats, params)
    }

    /// List a chat's messages in chronological (insertion) order.
    pub async fn list_messages(
        &self,
        chat_id: Uuid,
        params: PageParams,
    ) -> Result<PaginatedResponse<Message>, DomainError> {
        let inner = self.inner.read().await;
        let messages = inner
            .messages
            .get(&chat_id)
            .ok_or(DomainError::ChatNotFound)?
            .clone();
        Ok(paginate(messages, params))
    }

    /// Exact idempotency-key lookup within one chat.
    pub async fn find_message_by_idempotency_key(
        &self,
        chat_id: Uuid,
        key: &str,
    ) -> Result<Message, DomainError> {
        let inner = self.inner.read().await;
        let messages = inner.messages.get(&chat_id).ok_or(DomainError::ChatNotFound)?;
        find_by_key(messages, key).ok_or(DomainError::MessageNotFound)
    }

    /// Find a message by id across all chats.
    pub async fn find_message(&self, message_id: Uuid) -> Result<Message, DomainError> {
        let inner = self.inner.read().await;
        inner
            .messages
            .values()
            .flatten()
            .find(|m| m.id == message_id)
            .cloned()
            .ok_or(DomainError::MessageNotFound)
    }

    /// Find a chat by id.
    pub async fn find_chat(&self, chat_id: Uuid) -> Result<Chat, DomainError> {
        let inner = self.inner.read().await;
        inner
            .chats
            .get(&chat_id)
            .cloned()
            .ok_or(DomainError::ChatNotFound)
    }
}

fn find_by_key(messages: &[Message], key: &str) -> Option<Message> {
    messages
        .iter()
        .find(|m| m.idempotency_key.as_deref() == Some(key))
        .cloned()
}
