/**
 * Connection Session Tasks
 *
 * The two per-connection tasks behind every live websocket session:
 *
 * - The writer drains the session's outbound queue onto the wire and
 *   emits keepalive pings on a fixed interval. It terminates cleanly
 *   when the queue closes (eviction or unregistration) and abruptly
 *   when a write fails or exceeds its deadline. On every exit path it
 *   closes the connection, which is what wakes the reader.
 * - The reader consumes inbound frames until the connection errors or
 *   closes. Read receipts are the only recognized inbound frame; all
 *   other shapes are ignored without surfacing anything to the peer.
 *   On exit the reader unregisters its own session — the only cleanup
 *   path for a client that disconnected normally.
 *
 * Neither task touches the hub's session map; the writer owns its end
 * of the queue and the reader only enqueues an unregister event.
 */
use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::backend::hub::registry::HubHandle;
use crate::backend::service::MessageService;
use crate::shared::frame::InboundFrame;
use crate::shared::model::MessageStatus;

/// Interval between keepalive pings on an otherwise idle connection.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Deadline for any single write to the wire. A stalled client breaches
/// this and loses the connection instead of holding the session open.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Drain the outbound queue onto the wire, pinging on idle.
pub async fn run_writer(
    mut wire: SplitSink<WebSocket, WsMessage>,
    mut outbound: mpsc::Receiver<String>,
) {
    let mut keepalive = interval_at(Instant::now() + KEEPALIVE_INTERVAL, KEEPALIVE_INTERVAL);
    keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            payload = outbound.recv() => match payload {
                Some(text) => {
                    if !write(&mut wire, WsMessage::Text(text.into())).await {
                        break;
                    }
                }
                None => {
                    // Queue closed: this session was evicted or
                    // unregistered.
                    break;
                }
            },
            _ = keepalive.tick() => {
                if !write(&mut wire, WsMessage::Ping(Vec::new().into())).await {
                    break;
                }
            }
        }
    }

    // Close the connection no matter how the loop ended. Without the
    // close handshake a stalled-but-alive client leaves the reader
    // parked on a live socket, and the session is never unregistered.
    let _ = timeout(WRITE_TIMEOUT, wire.close()).await;
}

/// Write one frame under the per-write deadline. Returns false when the
/// writer should terminate.
async fn write(wire: &mut SplitSink<WebSocket, WsMessage>, frame: WsMessage) -> bool {
    match timeout(WRITE_TIMEOUT, wire.send(frame)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::debug!("[WS] Write failed, closing session: {e}");
            false
        }
        Err(_) => {
            tracing::warn!("[WS] Write deadline exceeded, closing session");
            false
        }
    }
}

/// Consume inbound frames until the connection errors or closes, then
/// unregister this session.
pub async fn run_reader(
    mut wire: SplitStream<WebSocket>,
    hub: HubHandle,
    service: MessageService,
    user_id: String,
    session_id: Uuid,
) {
    while let Some(frame) = wire.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("[WS] Read failed for {user_id}: {e}");
                break;
            }
        };

        match frame {
            WsMessage::Text(text) => match serde_json::from_str::<InboundFrame>(text.as_str()) {
                Ok(InboundFrame::MarkRead { message_id }) => {
                    if let Err(e) = service
                        .update_message_status(message_id, MessageStatus::Read)
                        .await
                    {
                        tracing::debug!("[WS] Read receipt for unknown message {message_id}: {e}");
                    }
                }
                // Unrecognized or malformed frames are ignored; nothing
                // is surfaced to the sender.
                Err(_) => {}
            },
            WsMessage::Close(_) => break,
            // Pings and pongs are handled by the protocol layer
            _ => {}
        }
    }

    hub.unregister(user_id, session_id).await;
}
