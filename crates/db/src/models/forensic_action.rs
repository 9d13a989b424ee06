//! Forensic action (checklist item) model and DTOs.

use caseboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `forensic_actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForensicAction {
    pub id: DbId,
    pub case_id: DbId,
    pub template_id: Option<String>,
    pub action_type: String,
    pub description: String,
    pub status: String,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub performed_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a checklist item to a case.
///
/// Either `template_id` names one of the fixed templates, or both
/// `action_type` and `description` describe a custom item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateForensicAction {
    pub template_id: Option<String>,
    pub action_type: Option<String>,
    pub description: Option<String>,
}

/// DTO for toggling completion of a checklist item.
#[derive(Debug, Clone, Deserialize)]
pub struct SetActionCompletion {
    pub is_completed: bool,
}
