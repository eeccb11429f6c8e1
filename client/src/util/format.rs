//! Display formatting for API timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `2025-01-02T03:04:05.678Z` -> `2025-01-02 03:04`. Values that do not look
/// like ISO-8601 are shown unchanged; a missing value renders as `-`.
pub fn short_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_owned();
    };
    let Some((date, time)) = raw.split_once('T') else {
        return raw.to_owned();
    };
    let minutes: String = time.chars().take(5).collect();
    if date.len() != 10 || minutes.len() != 5 || !minutes.contains(':') {
        return raw.to_owned();
    }
    format!("{date} {minutes}")
}
