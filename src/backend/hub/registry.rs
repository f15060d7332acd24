/**
 * Connection Registry (Hub)
 *
 * The hub is a single-owner event loop over the map of live sessions:
 * user id -> the one session currently allowed to receive deliveries.
 * No other task ever reads or writes that map; producers (websocket
 * handlers, the send-message endpoint) only enqueue `HubEvent`s.
 *
 * One serialized loop gives a total order over register / unregister /
 * broadcast, which is what makes the two race-prone rules safe without
 * any locking:
 *
 * - Register evicts an existing session for the same user id (its
 *   outbound queue closes, which terminates its writer task) before the
 *   replacement lands in the map.
 * - Unregister removes the mapping only if it still points at that exact
 *   session, so a stale unregister racing a newer register cannot tear
 *   down the replacement.
 *
 * # Delivery
 *
 * Broadcast is best-effort. No session for the recipient means the event
 * is dropped. Enqueueing onto a session's outbound queue is non-blocking;
 * success fires an asynchronous `delivered` status update, while a full
 * queue evicts the session outright — a slow consumer loses its live
 * session rather than stalling the loop for everyone else.
 */
use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use crate::backend::service::MessageService;
use crate::shared::model::{Message, MessageStatus};

/// Capacity of the hub's inbound event queue.
pub const HUB_QUEUE_CAPACITY: usize = 256;

/// Capacity of each session's outbound delivery queue.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// A live binding between a user id and one outbound delivery queue.
///
/// The hub's map holds the only sender for the queue, so removing a
/// session from the map closes the queue and ends its writer task.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub user_id: String,
    outbound: mpsc::Sender<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, outbound: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            outbound,
        }
    }

    fn try_deliver(&self, payload: String) -> Result<(), TrySendError<String>> {
        self.outbound.try_send(payload)
    }
}

/// Events processed by the hub loop, strictly in arrival order.
#[derive(Debug)]
pub enum HubEvent {
    Register(Session),
    Unregister { user_id: String, session_id: Uuid },
    Broadcast { message: Message, recipient_id: String },
}

/// Clonable producer handle; the only way to reach the hub loop.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::Sender<HubEvent>,
}

impl HubHandle {
    /// Register a session, evicting any existing one for the same user.
    pub async fn register(&self, session: Session) {
        self.send(HubEvent::Register(session)).await;
    }

    /// Remove a session, but only if it is still the current one for its
    /// user id.
    pub async fn unregister(&self, user_id: impl Into<String>, session_id: Uuid) {
        self.send(HubEvent::Unregister {
            user_id: user_id.into(),
            session_id,
        })
        .await;
    }

    /// Attempt best-effort delivery of a message to the recipient's live
    /// session, if any.
    pub async fn broadcast(&self, message: Message, recipient_id: impl Into<String>) {
        self.send(HubEvent::Broadcast {
            message,
            recipient_id: recipient_id.into(),
        })
        .await;
    }

    async fn send(&self, event: HubEvent) {
        // Only fails when the hub loop is gone, i.e. during shutdown.
        if self.events.send(event).await.is_err() {
            tracing::debug!("[Hub] Event dropped, hub loop has stopped");
        }
    }
}

/// The hub event loop state. Owned by exactly one task once spawned.
pub struct Hub {
    sessions: HashMap<String, Session>,
    service: MessageService,
    events: mpsc::Receiver<HubEvent>,
}

impl Hub {
    /// Create the hub and its producer handle.
    pub fn new(service: MessageService) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::channel(HUB_QUEUE_CAPACITY);
        (
            Self {
                sessions: HashMap::new(),
                service,
                events: rx,
            },
            HubHandle { events: tx },
        )
    }

    /// Run the event loop until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            self.handle(event);
        }
        tracing::debug!("[Hub] All handles dropped, loop exiting");
    }

    fn handle(&mut self, event: HubEvent) {
        match event {
            HubEvent::Register(session) => {
                if let Some(evicted) = self.sessions.remove(&session.user_id) {
                    // Dropping the evicted session closes its outbound
                    // queue, which terminates its writer task.
                    tracing::info!(
                        "[Hub] Evicting session {} for re-registering user {}",
                        evicted.id,
                        session.user_id
                    );
                }
                tracing::info!("[Hub] Registered session {} for {}", session.id, session.user_id);
                self.sessions.insert(session.user_id.clone(), session);
            }
            HubEvent::Unregister { user_id, session_id } => {
                // A session that was already evicted must not tear down
                // its replacement.
                let still_current = self
                    .sessions
                    .get(&user_id)
                    .map(|current| current.id == session_id)
                    .unwrap_or(false);
                if still_current {
                    self.sessions.remove(&user_id);
                    tracing::info!("[Hub] Unregistered session {} for {}", session_id, user_id);
                }
            }
            HubEvent::Broadcast { message, recipient_id } => {
                self.broadcast(message, &recipient_id);
            }
        }
    }

    fn broadcast(&mut self, message: Message, recipient_id: &str) {
        let Some(session) = self.sessions.get(recipient_id) else {
            // Recipient not reachable right now: defined no-op, the
            // message stays in `sent`.
            tracing::debug!("[Hub] No live session for {}, dropping broadcast", recipient_id);
            return;
        };

        let payload = match serde_json::to_string(&message) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("[Hub] Failed to serialize broadcast payload: {e}");
                return;
            }
        };

        match session.try_deliver(payload) {
            Ok(()) => {
                // Fire-and-forget: a failed status update does not roll
                // back the delivery.
                let service = self.service.clone();
                let message_id = message.id;
                tokio::spawn(async move {
                    if let Err(e) = service
                        .update_message_status(message_id, MessageStatus::Delivered)
                        .await
                    {
                        tracing::warn!("[Hub] Failed to mark {message_id} delivered: {e}");
                    }
                });
            }
            Err(TrySendError::Full(_)) => {
                // Backpressure from one slow consumer must not stall the
                // loop: the session loses its slot instead.
                if let Some(evicted) = self.sessions.remove(recipient_id) {
                    tracing::warn!(
                        "[Hub] Outbound queue full, evicting session {} for {}",
                        evicted.id,
                        recipient_id
                    );
                }
            }
            Err(TrySendError::Closed(_)) => {
                // Writer already died; clean up the stale mapping.
                self.sessions.remove(recipient_id);
                tracing::debug!("[Hub] Removed closed session for {}", recipient_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::ChatStore;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    struct Fixture {
        service: MessageService,
        hub: HubHandle,
    }

    fn start_hub() -> Fixture {
        let service = MessageService::new(ChatStore::new());
        let (hub, handle) = Hub::new(service.clone());
        tokio::spawn(hub.run());
        Fixture { service, hub: handle }
    }

    async fn send_test_message(service: &MessageService) -> Message {
        service.send_message("alice", "bob", "hello", "").await.unwrap()
    }

    async fn current_status(service: &MessageService, message: &Message) -> MessageStatus {
        service
            .get_chat_messages(message.chat_id, Default::default())
            .await
            .unwrap()
            .data
            .iter()
            .find(|m| m.id == message.id)
            .unwrap()
            .status
    }

    async fn wait_for_status(service: &MessageService, message: &Message, expected: MessageStatus) {
        timeout(Duration::from_secs(2), async {
            loop {
                if current_status(service, message).await == expected {
                    return;
                }
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("status did not converge in time");
    }

    #[tokio::test]
    async fn test_broadcast_delivers_and_marks_delivered() {
        let fx = start_hub();
        let (tx, mut rx) = mpsc::channel(8);
        fx.hub.register(Session::new("bob", tx)).await;

        let message = send_test_message(&fx.service).await;
        fx.hub.broadcast(message.clone(), "bob").await;

        let payload = timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let delivered: Message = serde_json::from_str(&payload).unwrap();
        assert_eq!(delivered.id, message.id);
        assert_eq!(delivered.content, "hello");

        wait_for_status(&fx.service, &message, MessageStatus::Delivered).await;
    }

    #[tokio::test]
    async fn test_broadcast_without_session_is_a_noop() {
        let fx = start_hub();
        let message = send_test_message(&fx.service).await;

        fx.hub.broadcast(message.clone(), "bob").await;

        // Give the loop time to process; the status must remain `sent`.
        sleep(Duration::from_millis(50)).await;
        assert_eq!(current_status(&fx.service, &message).await, MessageStatus::Sent);
    }

    #[tokio::test]
    async fn test_reregistration_evicts_previous_session() {
        let fx = start_hub();

        let (tx1, mut rx1) = mpsc::channel(8);
        fx.hub.register(Session::new("bob", tx1)).await;

        let (tx2, mut rx2) = mpsc::channel(8);
        fx.hub.register(Session::new("bob", tx2)).await;

        // The first session's queue closes as part of the second register
        let closed = timeout(Duration::from_secs(2), rx1.recv()).await.unwrap();
        assert!(closed.is_none());

        // Deliveries reach only the replacement
        let message = send_test_message(&fx.service).await;
        fx.hub.broadcast(message.clone(), "bob").await;
        let payload = timeout(Duration::from_secs(2), rx2.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(payload.contains(&message.id.to_string()));
    }

    #[tokio::test]
    async fn test_stale_unregister_does_not_remove_replacement() {
        let fx = start_hub();

        let (tx1, _rx1) = mpsc::channel(8);
        let stale = Session::new("bob", tx1);
        let stale_id = stale.id;
        fx.hub.register(stale).await;

        let (tx2, mut rx2) = mpsc::channel(8);
        fx.hub.register(Session::new("bob", tx2)).await;

        // The evicted session's reader task fires its own unregister;
        // it must not tear down the replacement.
        fx.hub.unregister("bob", stale_id).await;

        let message = send_test_message(&fx.service).await;
        fx.hub.broadcast(message.clone(), "bob").await;
        let payload = timeout(Duration::from_secs(2), rx2.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(payload.contains(&message.id.to_string()));
    }

    #[tokio::test]
    async fn test_unregister_removes_current_session() {
        let fx = start_hub();

        let (tx, mut rx) = mpsc::channel(8);
        let session = Session::new("bob", tx);
        let session_id = session.id;
        fx.hub.register(session).await;
        fx.hub.unregister("bob", session_id).await;

        // Queue closes on removal
        let closed = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert!(closed.is_none());

        // And subsequent broadcasts are dropped without a delivery
        let message = send_test_message(&fx.service).await;
        fx.hub.broadcast(message.clone(), "bob").await;
        sleep(Duration::from_millis(50)).await;
        assert_eq!(current_status(&fx.service, &message).await, MessageStatus::Sent);
    }

    #[tokio::test]
    async fn test_full_outbound_queue_evicts_session() {
        let fx = start_hub();

        // A consumer that never drains a capacity-1 queue
        let (tx, mut rx) = mpsc::channel(1);
        fx.hub.register(Session::new("bob", tx)).await;

        let first = fx
            .service
            .send_message("alice", "bob", "first", "")
            .await
            .unwrap();
        let second = fx
            .service
            .send_message("alice", "bob", "second", "")
            .await
            .unwrap();

        fx.hub.broadcast(first.clone(), "bob").await;
        fx.hub.broadcast(second.clone(), "bob").await;

        // First delivery was enqueued; the second overflowed the queue
        // and evicted the session, closing it.
        let payload = timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(payload.contains(&first.id.to_string()));
        let closed = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert!(closed.is_none());

        wait_for_status(&fx.service, &first, MessageStatus::Delivered).await;
        assert_eq!(current_status(&fx.service, &second).await, MessageStatus::Sent);
    }
}
