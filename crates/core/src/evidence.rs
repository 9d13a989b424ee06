//! Digital evidence classification, numbering, and validation.

use crate::error::CoreError;

define_text_enum! {
    /// Kind of digital artifact collected as evidence.
    EvidenceType ("evidence_type") {
        File = "file",
        Image = "image",
        Video = "video",
        Document = "document",
        Log = "log",
        NetworkCapture = "network_capture",
        MemoryDump = "memory_dump",
        Other = "other",
    }
}

/// Maximum length of an evidence file name.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Infer an [`EvidenceType`] from a file name and optional MIME type.
///
/// Rules are checked in order; the first match wins:
///
/// 1. `image/*` -> image
/// 2. `video/*` -> video
/// 3. `application/pdf`, or a MIME containing `document` or `text` -> document
/// 4. extension `log`, or a name containing `log` -> log
/// 5. extension `dmp`, or a name containing `memory` -> memory dump
/// 6. extension `pcap`, or a name containing `network` -> network capture
/// 7. anything else -> file
pub fn detect_evidence_type(file_name: &str, mime: Option<&str>) -> EvidenceType {
    let mime = mime.unwrap_or("").to_ascii_lowercase();
    let name = file_name.to_lowercase();
    let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

    if mime.starts_with("image/") {
        return EvidenceType::Image;
    }
    if mime.starts_with("video/") {
        return EvidenceType::Video;
    }
    if mime == "application/pdf" || mime.contains("document") || mime.contains("text") {
        return EvidenceType::Document;
    }
    if extension == "log" || name.contains("log") {
        return EvidenceType::Log;
    }
    if extension == "dmp" || name.contains("memory") {
        return EvidenceType::MemoryDump;
    }
    if extension == "pcap" || name.contains("network") {
        return EvidenceType::NetworkCapture;
    }
    EvidenceType::File
}

/// Build the evidence number for the `seq`-th item (1-based) of a case.
///
/// Format: `{case_number}-E{seq:03}`.
pub fn evidence_number(case_number: &str, seq: i64) -> String {
    format!("{case_number}-E{seq:03}")
}

/// File sizes are byte counts and cannot be negative.
pub fn validate_file_size(size: Option<i64>) -> Result<(), CoreError> {
    match size {
        Some(s) if s < 0 => Err(CoreError::Validation(format!(
            "file_size must be >= 0, got {s}"
        ))),
        _ => Ok(()),
    }
}

/// Validate an optional file name's length.
pub fn validate_file_name(file_name: Option<&str>) -> Result<(), CoreError> {
    match file_name {
        Some(n) if n.chars().count() > MAX_FILE_NAME_LENGTH => Err(CoreError::Validation(
            format!("file_name must be at most {MAX_FILE_NAME_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

/// Render a byte count as megabytes with two decimals, e.g. `"1.50 MB"`.
pub fn format_file_size_mb(bytes: i64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}
