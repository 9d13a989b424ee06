//! Victim field validation.

use crate::error::CoreError;
use crate::suspect::validate_person_name;

/// Maximum length for free-text contact details.
pub const MAX_CONTACT_LENGTH: usize = 255;

/// Validate a victim name: non-blank and bounded in length.
pub fn validate_victim_name(name: &str) -> Result<(), CoreError> {
    validate_person_name("victim", name)
}

/// Contact details are optional but bounded.
pub fn validate_contact(contact: Option<&str>) -> Result<(), CoreError> {
    match contact {
        Some(c) if c.chars().count() > MAX_CONTACT_LENGTH => Err(CoreError::Validation(format!(
            "contact must be at most {MAX_CONTACT_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}
