//! Row-to-entity parsing helpers.
//!
//! Timestamps are written with [`format_datetime`] and read back with
//! [`parse_datetime`]. Writing a fixed microsecond precision keeps text
//! ordering in SQL identical to chronological ordering.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Current time, truncated to the precision the store persists.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp for a TEXT column.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::InvalidState(format!("Failed to parse enum from '{s}': {e}")))
}

/// Convert a `COUNT(*)` column to `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for a negative count.
pub fn count_from_i64(n: i64) -> Result<u64, DatabaseError> {
    u64::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("negative count {n}")))
}

#[cfg(test)]
mod tests {
    use fb_core::enums::FeedbackStatus;

    use super::*;

    #[test]
    fn formatted_timestamps_roundtrip_exactly() {
        let ts = now();
        let text = format_datetime(&ts);
        assert!(text.ends_with('Z'));
        assert_eq!(parse_datetime(&text).unwrap(), ts);
    }

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let a = parse_datetime("2026-02-09T14:30:00Z").unwrap();
        let b = parse_datetime("2026-02-09T14:30:00.5Z").unwrap();
        let c = parse_datetime("2026-02-10T01:00:00Z").unwrap();
        let mut texts = vec![format_datetime(&c), format_datetime(&a), format_datetime(&b)];
        texts.sort();
        assert_eq!(
            texts,
            vec![format_datetime(&a), format_datetime(&b), format_datetime(&c)]
        );
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(format_datetime(&dt), "2026-02-09T14:30:00.000000Z");
    }

    #[test]
    fn parse_enum_reads_wire_literals() {
        let status: FeedbackStatus = parse_enum("in-progress").unwrap();
        assert_eq!(status, FeedbackStatus::InProgress);
        assert!(parse_enum::<FeedbackStatus>("archived").is_err());
    }

    #[test]
    fn negative_count_is_invalid_state() {
        assert_eq!(count_from_i64(3).unwrap(), 3);
        assert!(matches!(
            count_from_i64(-1),
            Err(DatabaseError::InvalidState(_))
        ));
    }
}
