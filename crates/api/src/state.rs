use std::sync::Arc;

use caseboard_events::{ChangeEvent, EventBus};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: caseboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Change-event bus; every mutation publishes here.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            action = %event.action,
            entity_type = %event.entity_type,
            entity_id = event.entity_id,
            "Publishing change event"
        );
        self.event_bus.publish(event);
    }
}
