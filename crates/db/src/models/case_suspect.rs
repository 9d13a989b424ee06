//! `case_suspects` join rows and the suspect-with-involvement projection.

use caseboard_core::suspect::InvolvementLevel;
use caseboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::suspect::{CreateSuspect, Suspect};

/// A row from the `case_suspects` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseSuspect {
    pub id: DbId,
    pub case_id: DbId,
    pub suspect_id: DbId,
    pub involvement_level: String,
    pub relationship_to_case: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A suspect as seen from one case: the suspect row plus how it is
/// involved in that case.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseSuspectDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub suspect: Suspect,
    pub involvement_level: String,
    pub relationship_to_case: Option<String>,
}

/// Attach a suspect to a case: either an existing one by id, or a new one
/// created in the same operation. Exactly one of the two must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkCaseSuspect {
    pub suspect_id: Option<DbId>,
    pub suspect: Option<CreateSuspect>,
    /// Defaults to `unknown` if omitted.
    pub involvement_level: Option<InvolvementLevel>,
    pub relationship_to_case: Option<String>,
}

/// DTO for changing how a linked suspect is involved.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCaseSuspect {
    pub involvement_level: Option<InvolvementLevel>,
    pub relationship_to_case: Option<String>,
}
