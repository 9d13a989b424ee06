//! Event-to-WebSocket fan-out.

use std::sync::Arc;

use axum::extract::ws::Message;
use caseboard_events::ChangeEvent;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Message type tag of change notifications.
pub const MESSAGE_TYPE_CHANGE: &str = "change";

/// Wire format of a change notification.
#[derive(Debug, Serialize)]
pub struct ChangeMessage<'a> {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub event: &'a ChangeEvent,
}

/// Forwards change events to every connected WebSocket client.
pub struct ChangeBroadcaster {
    ws_manager: Arc<WsManager>,
}

impl ChangeBroadcaster {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](caseboard_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => match encode(&event) {
                    Ok(text) => self.ws_manager.broadcast(Message::Text(text.into())).await,
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            entity_type = %event.entity_type,
                            "Failed to encode change event"
                        );
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change broadcaster lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change broadcaster shutting down");
                    break;
                }
            }
        }
    }
}

/// Serialize an event as a `{"type": "change", "event": {...}}` JSON text.
pub fn encode(event: &ChangeEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ChangeMessage {
        message_type: MESSAGE_TYPE_CHANGE,
        event,
    })
}
