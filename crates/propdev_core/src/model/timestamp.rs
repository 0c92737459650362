//! ISO-8601 timestamp helpers for project records.
//!
//! # Invariants
//! - Every timestamp produced here is UTC with millisecond precision
//!   (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
//! - `next_update_timestamp` is strictly later than the previous stamp when
//!   the previous stamp parses.

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

/// Returns the current UTC time as an ISO-8601 string.
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

/// Renders Unix epoch milliseconds as an ISO-8601 string.
///
/// Returns `None` for values outside chrono's representable range.
pub fn epoch_ms_to_iso(epoch_ms: i64) -> Option<String> {
    Utc.timestamp_millis_opt(epoch_ms).single().map(format_iso)
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Returns a fresh `updatedAt` stamp for a record last stamped at `previous`.
///
/// Falls back to plain "now" when `previous` is not a parseable timestamp.
pub fn next_update_timestamp(previous: &str) -> String {
    let now = truncate_to_millis(Utc::now());
    match parse_iso(previous) {
        Some(previous) if now <= previous => format_iso(previous + Duration::milliseconds(1)),
        _ => format_iso(now),
    }
}

fn format_iso(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .unwrap_or(value)
}
