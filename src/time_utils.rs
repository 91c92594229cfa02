// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Which end of a day a date-only value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    Start,
    End,
}

/// Parse an RFC3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Bare dates resolve to the first or last instant of that UTC day, so an
/// end-of-range date includes the whole day.
pub fn parse_date(raw: &str, bound: DayBound) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match bound {
        DayBound::Start => NaiveTime::MIN,
        DayBound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?,
    };
    Some(date.and_time(time).and_utc())
}

/// Serde adapter storing timestamps as second-precision RFC3339 strings.
///
/// The fixed width keeps lexicographic order equal to chronological order,
/// which Firestore range filters on the `date` field rely on.
pub mod rfc3339_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date("2024-01-15T10:30:00+02:00", DayBound::Start).unwrap();
        assert_eq!(format_utc_rfc3339(dt), "2024-01-15T08:30:00Z");
    }

    #[test]
    fn test_parse_bare_date_bounds() {
        let start = parse_date("2024-01-15", DayBound::Start).unwrap();
        let end = parse_date("2024-01-15", DayBound::End).unwrap();

        assert_eq!(format_utc_rfc3339(start), "2024-01-15T00:00:00Z");
        assert_eq!(format_utc_rfc3339(end), "2024-01-15T23:59:59Z");
        assert!(start < end);
    }

    #[test]
    fn test_rfc3339_seconds_sorts_chronologically() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Entry {
            #[serde(with = "rfc3339_seconds")]
            date: DateTime<Utc>,
        }

        let early = parse_date("2024-01-15T09:00:00.750Z", DayBound::Start).unwrap();
        let late = parse_date("2024-01-15T10:00:00Z", DayBound::Start).unwrap();

        let early_json = serde_json::to_string(&Entry { date: early }).unwrap();
        let late_json = serde_json::to_string(&Entry { date: late }).unwrap();
        assert_eq!(early_json, r#"{"date":"2024-01-15T09:00:00Z"}"#);
        assert!(early_json < late_json);

        let back: Entry = serde_json::from_str(&late_json).unwrap();
        assert_eq!(back.date, late);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("yesterday", DayBound::Start).is_none());
        assert!(parse_date("2024-13-01", DayBound::End).is_none());
    }
}
