//! Normalization of free-text form fields.

/// Treat blank optional strings as absent.
///
/// Form submissions send `""` for untouched fields; storing them as `NULL`
/// keeps the columns meaningful. Non-blank values are trimmed.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
