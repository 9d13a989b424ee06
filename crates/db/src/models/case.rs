//! Case entity model, the composite create DTO, and the assembled detail view.

use caseboard_core::case::{CaseStatus, CaseType};
use caseboard_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::case_suspect::{CaseSuspectDetail, LinkCaseSuspect};
use super::evidence::{CreateEvidence, Evidence};
use super::forensic_action::ForensicAction;
use super::victim::{CreateVictim, Victim};

/// A row from the `cases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Case {
    pub id: DbId,
    pub case_number: String,
    pub case_type: String,
    pub status: String,
    pub incident_date: Date,
    pub summary: String,
    pub victim_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Case row for list views, carrying the linked victim's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CaseListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub case: Case,
    pub victim_name: Option<String>,
}

/// Composite DTO for opening a case together with its related records.
///
/// The victim is either an existing row (`victim_id`) or created inline
/// (`victim`); supplying both is rejected. Suspects, evidence, and the
/// checklist are all created in the same transaction as the case.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCase {
    pub case_type: CaseType,
    pub incident_date: Date,
    pub summary: String,
    pub victim_id: Option<DbId>,
    pub victim: Option<CreateVictim>,
    pub assigned_to: Option<DbId>,
    #[serde(default)]
    pub suspects: Vec<LinkCaseSuspect>,
    #[serde(default)]
    pub evidence: Vec<CreateEvidence>,
    /// Template ids for the initial checklist. `None` selects the default
    /// templates; an empty list creates no checklist items.
    pub action_template_ids: Option<Vec<String>>,
}

/// DTO for updating a case. All fields are optional; the case number is
/// immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCase {
    pub case_type: Option<CaseType>,
    pub status: Option<CaseStatus>,
    pub incident_date: Option<Date>,
    pub summary: Option<String>,
    pub victim_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
}

/// DTO for `PATCH /cases/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCaseStatus {
    pub status: CaseStatus,
}

/// Filters accepted by the case list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseListQuery {
    pub status: Option<CaseStatus>,
    pub case_type: Option<CaseType>,
}

/// A case with every related record, as served by `GET /cases/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: Case,
    pub victim: Option<Victim>,
    pub suspects: Vec<CaseSuspectDetail>,
    pub evidence: Vec<Evidence>,
    pub forensic_actions: Vec<ForensicAction>,
    /// Share of completed checklist items, `0..=100`.
    pub progress_pct: u8,
}
