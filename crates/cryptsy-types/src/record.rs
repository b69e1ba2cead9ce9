//! Raw JSON records and field coercion
//!
//! Cryptsy returns most numbers as strings and uses different names for the
//! same field depending on the endpoint. The helpers here resolve a field from
//! a list of candidate names (first present wins) and coerce it to its typed
//! value, failing on malformed input instead of substituting a default.
//!
//! A field counts as present when the key exists, is not `null`, and is not
//! the empty string.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::str::FromStr;

use crate::enums::Side;
use crate::error::{ParseError, ParseResult};
use crate::market::MarketId;
use crate::time::parse_timestamp;

/// One JSON object from a response, before normalization
pub type RawRecord = Map<String, Value>;

/// Context injected into every record of a batch
///
/// Several endpoints omit the market id or side from each element because
/// the request already determines it. Values set here override whatever the
/// record carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordContext {
    /// Market id applied to every record
    pub market_id: Option<MarketId>,
    /// Side applied to every record
    pub side: Option<Side>,
}

impl RecordContext {
    /// Empty context, records must carry everything themselves
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a single market
    pub fn market(market_id: MarketId) -> Self {
        Self {
            market_id: Some(market_id),
            side: None,
        }
    }

    /// Set the side
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the market id
    pub fn with_market_id(mut self, market_id: MarketId) -> Self {
        self.market_id = Some(market_id);
        self
    }
}

/// Text of a field, if present
///
/// Numbers are rendered to their JSON text so they go through the same
/// parsing path as quoted numbers.
pub fn text<'a>(record: &'a RawRecord, key: &str) -> Option<Cow<'a, str>> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// First present field among `keys`, with the key that matched
pub fn first_present<'a>(
    record: &'a RawRecord,
    keys: &[&'a str],
) -> Option<(&'a str, Cow<'a, str>)> {
    keys.iter()
        .find_map(|key| text(record, key).map(|value| (*key, value)))
}

fn missing(keys: &[&str]) -> ParseError {
    ParseError::missing(keys.join("|"))
}

/// Parse a decimal, accepting plain and scientific notation
pub fn parse_decimal(field: &str, value: &str) -> ParseResult<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| ParseError::InvalidDecimal {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Parse an integer of any width
pub fn parse_integer<T: FromStr>(field: &str, value: &str) -> ParseResult<T> {
    value.trim().parse().map_err(|_| ParseError::InvalidInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse an order side
pub fn parse_side(field: &str, value: &str) -> ParseResult<Side> {
    value.trim().parse().map_err(|_| ParseError::InvalidSide {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Required decimal from the first present of `keys`
pub fn required_decimal(record: &RawRecord, keys: &[&str]) -> ParseResult<Decimal> {
    let (key, value) = first_present(record, keys).ok_or_else(|| missing(keys))?;
    parse_decimal(key, &value)
}

/// Optional decimal, `None` when absent
pub fn optional_decimal(record: &RawRecord, key: &str) -> ParseResult<Option<Decimal>> {
    text(record, key)
        .map(|value| parse_decimal(key, &value))
        .transpose()
}

/// Required integer from the first present of `keys`
pub fn required_integer<T: FromStr>(record: &RawRecord, keys: &[&str]) -> ParseResult<T> {
    let (key, value) = first_present(record, keys).ok_or_else(|| missing(keys))?;
    parse_integer(key, &value)
}

/// Optional integer, `None` when absent
pub fn optional_integer<T: FromStr>(record: &RawRecord, key: &str) -> ParseResult<Option<T>> {
    text(record, key)
        .map(|value| parse_integer(key, &value))
        .transpose()
}

/// Required timestamp from the first present of `keys`
pub fn required_timestamp(record: &RawRecord, keys: &[&str]) -> ParseResult<NaiveDateTime> {
    let (key, value) = first_present(record, keys).ok_or_else(|| missing(keys))?;
    parse_timestamp(key, &value)
}

/// Optional timestamp, `None` when absent
pub fn optional_timestamp(record: &RawRecord, key: &str) -> ParseResult<Option<NaiveDateTime>> {
    text(record, key)
        .map(|value| parse_timestamp(key, &value))
        .transpose()
}

/// Optional side, `None` when absent
pub fn optional_side(record: &RawRecord, key: &str) -> ParseResult<Option<Side>> {
    text(record, key)
        .map(|value| parse_side(key, &value))
        .transpose()
}

/// Optional free text, `None` when absent
pub fn optional_text(record: &RawRecord, key: &str) -> Option<String> {
    text(record, key).map(Cow::into_owned)
}

/// View a JSON value as a record
pub fn as_record<'a>(value: &'a Value, what: &str) -> ParseResult<&'a RawRecord> {
    value
        .as_object()
        .ok_or_else(|| ParseError::UnexpectedShape(format!("{} is not an object", what)))
}

/// Serde adapter for integers the server may send quoted (`"5"`) or bare (`5`)
pub mod int_or_string {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected integer, got {}",
                    other
                )))
            }
        };
        raw.trim().parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_text_treats_null_and_empty_as_absent() {
        let r = record(json!({"a": null, "b": "", "c": "1.5", "d": 7}));
        assert!(text(&r, "a").is_none());
        assert!(text(&r, "b").is_none());
        assert_eq!(text(&r, "c").as_deref(), Some("1.5"));
        assert_eq!(text(&r, "d").as_deref(), Some("7"));
        assert!(text(&r, "missing").is_none());
    }

    #[test]
    fn test_first_present_prefers_earlier_key() {
        let r = record(json!({"tradeprice": "2.5", "price": "9"}));
        let (key, value) = first_present(&r, &["tradeprice", "price"]).unwrap();
        assert_eq!(key, "tradeprice");
        assert_eq!(value, "2.5");

        let r = record(json!({"tradeprice": "", "price": "9"}));
        let (key, _) = first_present(&r, &["tradeprice", "price"]).unwrap();
        assert_eq!(key, "price");
    }

    #[test]
    fn test_decimal_keeps_precision() {
        let r = record(json!({"quantity": "0.00000001", "sci": "1e-8"}));
        assert_eq!(required_decimal(&r, &["quantity"]).unwrap(), dec!(0.00000001));
        assert_eq!(required_decimal(&r, &["sci"]).unwrap(), dec!(0.00000001));
    }

    #[test]
    fn test_malformed_decimal_fails() {
        let r = record(json!({"total": "12,5"}));
        let err = required_decimal(&r, &["total"]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDecimal { .. }));
    }

    #[test]
    fn test_missing_required_field_names_all_candidates() {
        let r = record(json!({}));
        let err = required_integer::<u64>(&r, &["tradeid", "id"]).unwrap_err();
        assert_eq!(err, ParseError::missing("tradeid|id"));
    }

    #[test]
    fn test_optional_absent_is_none_not_zero() {
        let r = record(json!({"fee": "0"}));
        assert_eq!(optional_decimal(&r, "fee").unwrap(), Some(Decimal::ZERO));
        assert_eq!(optional_decimal(&r, "order_id").unwrap(), None);
        assert_eq!(optional_integer::<u64>(&r, "order_id").unwrap(), None);
    }

    #[test]
    fn test_int_or_string_adapter() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "int_or_string")]
            id: u32,
        }

        let quoted: Wrapper = serde_json::from_value(json!({"id": "42"})).unwrap();
        let bare: Wrapper = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(quoted.id, 42);
        assert_eq!(bare.id, 42);
        assert!(serde_json::from_value::<Wrapper>(json!({"id": "x"})).is_err());
    }
}
