//! Timestamp parsing and formatting.
//!
//! Source observation timestamps arrive as ISO-8601 strings, usually with a
//! trailing "Z" ("2026-01-18T16:49:55.805Z") but sometimes with an explicit
//! offset or no zone at all. Zoneless values are treated as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

/// Parses a full observation timestamp; any parse failure is `None`.
pub fn parse_observed_at(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    None
}

/// Extracts only the date component of an observation timestamp.
///
/// The date is the timestamp's own calendar date: an offset never shifts a
/// record into a neighboring partition. `parse_observed_at` stays on the
/// UTC instant for dedup ordering.
pub fn parse_snapshot_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local().date());
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt.date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Formats a date for frame columns and partition keys.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp at microsecond precision, the finest the warehouse
/// accepts.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zulu_timestamp() {
        let date = parse_snapshot_date("2026-01-18T16:49:55.805Z");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 18));
    }

    #[test]
    fn parses_explicit_offset() {
        let dt = parse_observed_at("2026-01-18T23:49:55+07:00").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    }

    #[test]
    fn snapshot_date_keeps_local_calendar_day() {
        // 02:00 in +07:00 is 19:00 UTC the previous day; the partition date
        // must stay on the 19th.
        assert_eq!(
            parse_snapshot_date("2026-01-19T02:00:00+07:00"),
            NaiveDate::from_ymd_opt(2026, 1, 19)
        );
        // The instant itself still normalizes to UTC.
        let dt = parse_observed_at("2026-01-19T02:00:00+07:00").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    }

    #[test]
    fn parses_zoneless_as_utc() {
        assert!(parse_observed_at("2026-01-18T16:49:55.805").is_some());
        assert_eq!(
            parse_snapshot_date("2026-01-18"),
            NaiveDate::from_ymd_opt(2026, 1, 18)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_observed_at("").is_none());
        assert!(parse_observed_at("yesterday").is_none());
        assert!(parse_snapshot_date("2026-13-01").is_none());
    }

    #[test]
    fn timestamp_round_trip_is_stable() {
        let dt = parse_observed_at("2026-01-18T16:49:55.805Z").unwrap();
        assert_eq!(format_timestamp(dt), "2026-01-18T16:49:55.805000Z");
    }
}
