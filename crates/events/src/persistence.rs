//! Activity-log persistence service.
//!
//! [`ActivityPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and writes every received [`ChangeEvent`] to the
//! `activity_logs` table. It runs as a long-lived background task and shuts
//! down when the bus sender is dropped.

use caseboard_db::models::activity_log::CreateActivityLog;
use caseboard_db::repositories::ActivityLogRepo;
use caseboard_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::ChangeEvent;

/// Background service that records change events as activity log rows.
pub struct ActivityPersistence;

impl ActivityPersistence {
    /// Run the persistence loop.
    ///
    /// Persists every event received on `receiver`. The loop exits when the
    /// channel is closed (i.e. the [`EventBus`](crate::bus::EventBus) is
    /// dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = ActivityLogRepo::insert(&pool, &to_activity_log(&event)).await
                    {
                        tracing::error!(
                            error = %e,
                            action = %event.action,
                            entity_type = %event.entity_type,
                            entity_id = event.entity_id,
                            "Failed to persist activity"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Activity persistence lagged, some changes were not logged"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity persistence shutting down");
                    break;
                }
            }
        }
    }
}

/// Map a change event onto an activity log row. An empty payload is stored
/// as `NULL` details.
pub fn to_activity_log(event: &ChangeEvent) -> CreateActivityLog {
    let has_details = match &event.payload {
        serde_json::Value::Null => false,
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    };
    CreateActivityLog {
        user_id: event.actor_user_id,
        action: event.action.clone(),
        entity_type: event.entity_type.clone(),
        entity_id: Some(event.entity_id),
        details: has_details.then(|| event.payload.clone()),
    }
}
