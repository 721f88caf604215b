//! Picnic start time (de)serialization
//!
//! Start times are wall-clock values without a zone. Clients send either
//! a naive ISO-8601 timestamp (`2024-06-01T11:00:00`) or an RFC 3339 one
//! with an offset, which is normalized to UTC.

use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a client supplied start time.
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.f"))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid startTime '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn parses_naive() {
        assert_eq!(parse("2024-06-01T12:00:00"), Some(noon()));
        assert_eq!(parse("2024-06-01 12:00:00"), Some(noon()));
        assert_eq!(parse("2024-06-01T12:00"), Some(noon()));
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        assert_eq!(parse("2024-06-01T12:00:00Z"), Some(noon()));
        assert_eq!(parse("2024-06-01T14:00:00+02:00"), Some(noon()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("next tuesday"), None);
    }

    #[test]
    fn serializes_without_zone() {
        #[derive(serde::Serialize)]
        struct Wrapper(#[serde(with = "crate::models::timestamp")] NaiveDateTime);

        let json = serde_json::to_string(&Wrapper(noon())).unwrap();
        assert_eq!(json, "\"2024-06-01T12:00:00\"");
    }
}
