//! Victim entity model and DTOs.

use caseboard_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `victims` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Victim {
    pub id: DbId,
    pub name: String,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub report_date: Date,
    pub description: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new victim.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVictim {
    pub name: String,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    /// Defaults to the current date if omitted.
    pub report_date: Option<Date>,
    pub description: Option<String>,
}

/// DTO for updating an existing victim. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVictim {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub report_date: Option<Date>,
    pub description: Option<String>,
}
