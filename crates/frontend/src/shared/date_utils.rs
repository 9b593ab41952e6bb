//! Formatting helpers for file metadata shown in the upload widget
use chrono::{DateTime, NaiveDateTime};

/// Format an ISO timestamp to DD.MM.YYYY HH:MM:SS.
///
/// Accepts both naive (`2024-03-15T14:02:26.123456`) and offset
/// (`2024-03-15T14:02:26Z`) forms; anything else yields `None`.
pub fn format_upload_time(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let naive = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()?;
    Some(naive.format("%d.%m.%Y %H:%M:%S").to_string())
}

/// Bytes to megabytes with two decimals, e.g. "1.50 MB"
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Secondary line under a file name: size and upload time when known
pub fn file_caption(size: Option<u64>, upload_time: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(bytes) = size.filter(|b| *b > 0) {
        parts.push(format_size_mb(bytes));
    }
    if let Some(time) = upload_time.and_then(format_upload_time) {
        parts.push(format!("Uploaded: {}", time));
    }
    parts.join(" | ")
}
