//! SHA-256 digest validation for evidence integrity.
//!
//! Digests are computed by the acquisition tooling; the service only checks
//! and normalizes what it is given.

use crate::error::CoreError;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Validate a hex SHA-256 digest and return it lowercased.
pub fn normalize_sha256_hex(value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.len() != SHA256_HEX_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "file_hash_sha256 must be {SHA256_HEX_LEN} hexadecimal characters"
        )));
    }
    Ok(trimmed.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn normalizes_uppercase_digest() {
        let upper = format!("  {}  ", EMPTY_DIGEST.to_ascii_uppercase());
        assert_eq!(normalize_sha256_hex(&upper).unwrap(), EMPTY_DIGEST);
    }

    #[test]
    fn rejects_short_digest() {
        assert!(normalize_sha256_hex("abc123").is_err());
    }

    #[test]
    fn rejects_non_hex_digest() {
        let bad = "z".repeat(SHA256_HEX_LEN);
        assert!(normalize_sha256_hex(&bad).is_err());
    }
}
