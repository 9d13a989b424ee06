//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`ChangeEvent`]s.
//! It is shared via `Arc<EventBus>` across the application.

use caseboard_core::activity::{ACTION_CREATE, ACTION_DELETE, ACTION_UPDATE};
use caseboard_core::types::DbId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// A create, update, or delete of one record.
///
/// Constructed via [`ChangeEvent::created`], [`ChangeEvent::updated`], or
/// [`ChangeEvent::deleted`] and enriched with
/// [`with_actor`](ChangeEvent::with_actor) and
/// [`with_payload`](ChangeEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// One of `CREATE`, `UPDATE`, `DELETE`.
    pub action: String,

    /// Entity kind, e.g. `"case"` or `"evidence"`.
    pub entity_type: String,

    /// Database id of the changed record.
    pub entity_id: DbId,

    /// Id of the user that made the change.
    pub actor_user_id: Option<DbId>,

    /// Free-form JSON payload, usually the changed record.
    pub payload: serde_json::Value,

    /// When the change happened (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(action: &str, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        Self {
            action: action.to_string(),
            entity_type: entity_type.into(),
            entity_id,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn created(entity_type: impl Into<String>, entity_id: DbId) -> Self {
        Self::new(ACTION_CREATE, entity_type, entity_id)
    }

    pub fn updated(entity_type: impl Into<String>, entity_id: DbId) -> Self {
        Self::new(ACTION_UPDATE, entity_type, entity_id)
    }

    pub fn deleted(entity_type: impl Into<String>, entity_id: DbId) -> Self {
        Self::new(ACTION_DELETE, entity_type, entity_id)
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload. Values that fail to serialize leave the payload
    /// unchanged.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        if let Ok(value) = serde_json::to_value(payload) {
            self.payload = value;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ChangeEvent`].
///
/// # Usage
///
/// ```rust
/// use caseboard_events::bus::{ChangeEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ChangeEvent::created("case", 1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ChangeEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
