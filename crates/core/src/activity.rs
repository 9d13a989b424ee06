//! Activity log vocabulary shared by the event bus and the audit trail.

pub const ACTION_CREATE: &str = "CREATE";
pub const ACTION_UPDATE: &str = "UPDATE";
pub const ACTION_DELETE: &str = "DELETE";

pub const ENTITY_VICTIM: &str = "victim";
pub const ENTITY_SUSPECT: &str = "suspect";
pub const ENTITY_CASE: &str = "case";
pub const ENTITY_CASE_SUSPECT: &str = "case_suspect";
pub const ENTITY_EVIDENCE: &str = "evidence";
pub const ENTITY_FORENSIC_ACTION: &str = "forensic_action";

/// Default page size for activity queries.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on a single activity page.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Clamp a caller-supplied limit into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a caller-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
