/// Database models for TaskNest
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `profile`: User accounts ("profiles") with hashed credentials
/// - `task`: To-do items owned by a profile
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::profile::{Profile, CreateProfile};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_profile = CreateProfile {
///     username: "flergenbergenflurgen".to_string(),
///     email: "flergen@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let profile = Profile::create(&pool, new_profile).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDateTime, Utc};

pub mod profile;
pub mod task;

/// Wire format for every timestamp the API emits or accepts
///
/// Example: `25/12/2026 18:30:00`
pub const DATE_FMT: &str = "%d/%m/%Y %H:%M:%S";

/// Formats a timestamp for API responses using [`DATE_FMT`]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(DATE_FMT).to_string()
}

/// Parses a timestamp submitted by a client using [`DATE_FMT`]
///
/// Submitted times carry no zone information and are taken as UTC.
///
/// # Errors
///
/// Returns a `chrono::ParseError` if the input does not match the format.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(raw, DATE_FMT)?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 12, 25, 18, 30, 0).unwrap();
        assert_eq!(format_timestamp(ts), "25/12/2026 18:30:00");
    }

    #[test]
    fn test_parse_timestamp_valid() {
        let parsed = parse_timestamp("25/12/2026 18:30:00").expect("Should parse");
        let expected = Utc.with_ymd_and_hms(2026, 12, 25, 18, 30, 0).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_timestamp_rejects_iso8601() {
        assert!(parse_timestamp("2026-12-25T18:30:00Z").is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("not a date").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let parsed = parse_timestamp(&format_timestamp(ts)).expect("Should parse");
        assert_eq!(parsed, ts);
    }
}
