//! Suspect entity model and DTOs.

use caseboard_core::suspect::SuspectStatus;
use caseboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `suspects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Suspect {
    pub id: DbId,
    pub name: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub identification_number: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new suspect.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSuspect {
    pub name: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub identification_number: Option<String>,
    /// Defaults to `suspect` if omitted.
    pub status: Option<SuspectStatus>,
    pub notes: Option<String>,
}

/// DTO for updating an existing suspect. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSuspect {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub identification_number: Option<String>,
    pub status: Option<SuspectStatus>,
    pub notes: Option<String>,
}
