//! Activity log (audit trail) model and query DTOs.

use caseboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO, built by the event persistence service.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details: Option<serde_json::Value>,
}

/// Query parameters for `GET /activity`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub user_id: Option<DbId>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of activity plus the total matching row count.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityPage {
    pub items: Vec<ActivityLog>,
    pub total: i64,
}
