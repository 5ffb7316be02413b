//! Deserialization helpers for the loosely typed GENESIS JSON
//!
//! The web service serializes almost every scalar as a string and embeds
//! timestamps in German formats. These helpers turn them into proper types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer, de::Error};
use serde_json::Value;

/// Timestamp format of `LatestUpdate` fields and of the outbound `stand` parameter
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%Sh";

/// Date format of job and modification dates
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a GENESIS timestamp such as `10.01.2023 12:30:00h`
///
/// The trailing `h` is occasionally missing, so both variants are accepted.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%d.%m.%Y %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%d.%m.%Y %H:%Mh"))
        .ok()
}

/// Parse a GENESIS date such as `24.12.2022`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parse a GENESIS time of day such as `12:30:00` or `12:30`
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim().trim_end_matches('h');
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
}

pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw))),
    }
}

/// Like [`opt_timestamp`] but yields `None` for values that are not timestamps
///
/// Metadata records put free text like `"siehe Statistik"` into update fields.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|raw| parse_timestamp(&raw)))
}

pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
}

pub fn time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).ok_or_else(|| D::Error::custom(format!("invalid time '{}'", raw)))
}

pub fn serialize_timestamp<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
}

pub fn serialize_opt_timestamp<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize_timestamp(value, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn serialize_date<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(DATE_FORMAT).to_string())
}

/// Booleans arrive as JSON booleans, `"true"`/`"false"`, or `"ja"`/`"nein"`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "ja" | "yes" | "1" => Ok(true),
            "false" | "nein" | "no" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag '{}'", other))),
        },
        other => Err(D::Error::custom(format!("invalid flag {}", other))),
    }
}

/// Counts arrive as numbers or numeric strings; blanks count as zero
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_count(deserializer).map(|c| c.unwrap_or(0))
}

pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid count {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid count '{}'", s))),
        other => Err(D::Error::custom(format!("invalid count {}", other))),
    }
}

/// Status codes arrive as numbers or numeric strings
pub fn code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("invalid status code {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid status code '{}'", s))),
        other => Err(D::Error::custom(format!("invalid status code {}", other))),
    }
}

/// `null` and a missing key both become an empty vector
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free text fields are sometimes `null`; treat them as empty
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamps_with_and_without_suffix() {
        let ts = parse_timestamp("10.01.2023 12:30:45h").unwrap();
        assert_eq!((ts.day(), ts.month(), ts.year()), (10, 1, 2023));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (12, 30, 45));
        assert_eq!(parse_timestamp("10.01.2023 12:30:45"), Some(ts));
        assert!(parse_timestamp("2023-01-10T12:30:45").is_none());
    }

    #[test]
    fn dates_and_times() {
        let date = parse_date("24.12.2022").unwrap();
        assert_eq!((date.day(), date.month(), date.year()), (24, 12, 2022));
        assert!(parse_date("31.02.2022").is_none());

        assert_eq!(parse_time("07:05:09").unwrap().second(), 9);
        assert_eq!(parse_time("07:05").unwrap().minute(), 5);
        assert!(parse_time("seven").is_none());
    }
}
