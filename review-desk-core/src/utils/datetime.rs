//! Datetime serialization/deserialization helpers.
//!
//! Record timestamps are optional and arrive in several shapes:
//! - RFC3339 string
//! - Unix timestamp (seconds or milliseconds)
//! - Document-store timestamp object `{ "seconds": .., "nanoseconds": .. }`
//!
//! Serialization always writes RFC3339 or `null`.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Placeholder shown for a missing timestamp.
pub const MISSING: &str = "N/A";

/// Serializes `Option<DateTime<Utc>>` as RFC3339 or `null`.
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes `Option<DateTime<Utc>>` from any supported shape.
///
/// Timestamps are display-only, so a value in no supported shape reads as
/// `None` instead of failing the whole document.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed = parse_value(&value);
    if parsed.is_none() {
        log::debug!("Ignoring unparseable timestamp: {value}");
    }
    Ok(parsed)
}

fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|ts| i64::try_from(ts).ok()))
            .and_then(parse_unix_timestamp),
        Value::Object(fields) => {
            let seconds = fields
                .get("seconds")
                .or_else(|| fields.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanoseconds = fields
                .get("nanoseconds")
                .or_else(|| fields.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanoseconds)
        }
        _ => None,
    }
}

/// Formats a timestamp as a local date + time string, or `"N/A"` when absent.
#[must_use]
pub fn format_display(dt: Option<&DateTime<Utc>>) -> String {
    dt.map_or_else(
        || MISSING.to_string(),
        |dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

/// Parses a Unix timestamp with second/millisecond auto-detection.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Values larger than 10^11 are interpreted as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
