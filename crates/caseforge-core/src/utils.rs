//! Utility helpers — path resolution, timestamps, string manipulation.

use std::path::PathBuf;

/// Get the Caseforge data directory (e.g. `~/.caseforge/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".caseforge")
}

/// Get the reports directory (e.g. `~/.caseforge/reports/`).
pub fn get_reports_path() -> PathBuf {
    get_data_path().join("reports")
}

/// Get current unix time in seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Truncate a string to `max_len` characters. Unicode-safe, no ellipsis —
/// used for raw-body fallbacks where the tail is just noise.
pub fn truncate_chars(s: &str, max_len: usize) -> String {
    s.chars().take(max_len).collect()
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
