//! Evidence entity model and DTOs.

use caseboard_core::evidence::{detect_evidence_type, EvidenceType};
use caseboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `evidence` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Evidence {
    pub id: DbId,
    pub case_id: DbId,
    pub evidence_number: String,
    pub evidence_type: String,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub file_size: Option<i64>,
    pub file_hash_sha256: Option<String>,
    pub storage_location: Option<String>,
    pub collected_by: DbId,
    pub collection_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Evidence row enriched with the owning case's number, for the global
/// evidence list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvidenceWithCase {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub evidence: Evidence,
    pub case_number: String,
}

/// DTO for registering a new evidence item on a case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvidence {
    /// Inferred from `file_name` / `mime_type` if omitted.
    pub evidence_type: Option<EvidenceType>,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub file_size: Option<i64>,
    pub file_hash_sha256: Option<String>,
    pub storage_location: Option<String>,
    /// Only used for type inference; not stored.
    pub mime_type: Option<String>,
    /// Defaults to now if omitted.
    pub collection_date: Option<Timestamp>,
}

impl CreateEvidence {
    /// The explicit evidence type, or one inferred from the file metadata.
    pub fn resolved_type(&self) -> EvidenceType {
        self.evidence_type.unwrap_or_else(|| {
            detect_evidence_type(
                self.file_name.as_deref().unwrap_or(""),
                self.mime_type.as_deref(),
            )
        })
    }
}

/// DTO for updating an evidence item. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvidence {
    pub evidence_type: Option<EvidenceType>,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub file_size: Option<i64>,
    pub file_hash_sha256: Option<String>,
    pub storage_location: Option<String>,
}
