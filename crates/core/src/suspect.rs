//! Suspect classification and validation.

use crate::error::CoreError;

define_text_enum! {
    /// Standing of a suspect within the investigation.
    SuspectStatus ("suspect_status") {
        Suspect = "suspect",
        PersonOfInterest = "person_of_interest",
        Charged = "charged",
        Cleared = "cleared",
    }
}

impl Default for SuspectStatus {
    fn default() -> Self {
        Self::Suspect
    }
}

define_text_enum! {
    /// How a suspect is involved in one particular case.
    InvolvementLevel ("involvement_level") {
        Primary = "primary",
        Secondary = "secondary",
        Witness = "witness",
        Unknown = "unknown",
    }
}

impl Default for InvolvementLevel {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Maximum length of a person's name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Validate a suspect name: non-blank and at most [`MAX_NAME_LENGTH`] chars.
pub fn validate_suspect_name(name: &str) -> Result<(), CoreError> {
    validate_person_name("suspect", name)
}

/// Shared name rule for victims and suspects.
pub(crate) fn validate_person_name(kind: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{kind} name must not be empty")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{kind} name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}
