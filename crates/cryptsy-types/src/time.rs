//! Server timestamp format
//!
//! Cryptsy reports wall-clock times as `YYYY-MM-DD HH:MM:SS` strings with no
//! zone information, so they are kept as [`NaiveDateTime`].

use chrono::NaiveDateTime;

use crate::error::{ParseError, ParseResult};

/// Format used by every textual timestamp in the API
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a server timestamp, naming `field` in the error
pub fn parse_timestamp(field: &str, value: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        ParseError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

/// Render a timestamp the way the server does
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter for `NaiveDateTime` fields in server format
///
/// ```ignore
/// #[serde(with = "cryptsy_types::timestamp")]
/// pub created: NaiveDateTime,
/// ```
pub mod timestamp {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional server timestamps; `null` and `""` map to `None`
pub mod opt_timestamp {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&format_timestamp(time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
