//! Case classification, numbering, and field validation.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::error::CoreError;
use crate::types::{Date, Timestamp};

define_text_enum! {
    /// Kind of incident under investigation.
    CaseType ("case_type") {
        Cybercrime = "cybercrime",
        DataBreach = "data_breach",
        Malware = "malware",
        Fraud = "fraud",
        IntellectualProperty = "intellectual_property",
        Other = "other",
    }
}

define_text_enum! {
    /// Lifecycle status of a case.
    CaseStatus ("case_status") {
        Open = "open",
        InProgress = "in_progress",
        Closed = "closed",
        Archived = "archived",
    }
}

impl Default for CaseStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Prefix of every generated case number.
pub const CASE_NUMBER_PREFIX: &str = "CASE";

/// Default number of generate-and-check attempts before giving up.
pub const DEFAULT_CASE_NUMBER_ATTEMPTS: u32 = 5;

/// Maximum length of a case summary.
pub const MAX_SUMMARY_LENGTH: usize = 5000;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

static CASE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CASE-\d{8}-\d{6}-[A-Z]{2}\d{3}-\d{3}$").expect("valid regex")
});

/// Generate a candidate case number.
///
/// Format: `CASE-YYYYMMDD-HHMMSS-LLmmm-RRR` where `LL` are two random
/// uppercase letters, `mmm` the zero-padded milliseconds of `now`, and `RRR`
/// a zero-padded random number in `0..=999`.
///
/// Uniqueness is not guaranteed; callers check the candidate against the
/// store and retry on collision.
pub fn generate_case_number<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let letter_a = LETTERS[rng.random_range(0..LETTERS.len())] as char;
    let letter_b = LETTERS[rng.random_range(0..LETTERS.len())] as char;
    let millis = now.timestamp_subsec_millis() % 1000;
    let suffix: u16 = rng.random_range(0..=999);

    format!(
        "{CASE_NUMBER_PREFIX}-{}-{}-{letter_a}{letter_b}{millis:03}-{suffix:03}",
        now.format("%Y%m%d"),
        now.format("%H%M%S"),
    )
}

/// Whether `s` has the shape produced by [`generate_case_number`].
pub fn is_valid_case_number(s: &str) -> bool {
    CASE_NUMBER_RE.is_match(s)
}

/// Validate a case summary: non-blank and at most [`MAX_SUMMARY_LENGTH`] chars.
pub fn validate_summary(summary: &str) -> Result<(), CoreError> {
    if summary.trim().is_empty() {
        return Err(CoreError::Validation("summary must not be empty".to_string()));
    }
    let len = summary.chars().count();
    if len > MAX_SUMMARY_LENGTH {
        return Err(CoreError::Validation(format!(
            "summary must be at most {MAX_SUMMARY_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

/// An incident cannot be dated after `today`.
pub fn validate_incident_date(incident_date: Date, today: Date) -> Result<(), CoreError> {
    if incident_date > today {
        return Err(CoreError::Validation(format!(
            "incident_date {incident_date} is in the future"
        )));
    }
    Ok(())
}
