//! Response envelope
//!
//! Both endpoints answer with `{"success": ..., "return": ...}` on success and
//! `{"success": ..., "error": "..."}` on failure. The private API sends the
//! flag as a string (`"1"` / `"0"`), the public API as an integer.

use cryptsy_types::ParseError;
use serde_json::Value;

use crate::error::{RestError, RestResult};

/// Interpret the `success` flag
fn is_success(flag: &Value) -> bool {
    match flag {
        Value::String(s) => !matches!(s.trim(), "" | "0"),
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Unwrap a decoded response body into its payload
///
/// Returns the `return` member when present. A few informational endpoints
/// put their payload next to `success` instead, in which case the whole
/// object is the payload.
pub fn unwrap_envelope(body: Value) -> RestResult<Value> {
    let mut object = match body {
        Value::Object(object) => object,
        other => {
            return Err(ParseError::UnexpectedShape(format!(
                "response is not an object: {}",
                other
            ))
            .into())
        }
    };

    let flag = object
        .get("success")
        .ok_or_else(|| ParseError::missing("success"))?;

    if !is_success(flag) {
        let message = match object.remove("error") {
            Some(Value::String(message)) => message,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        return Err(RestError::api(message));
    }

    match object.remove("return") {
        Some(payload) => Ok(payload),
        None => Ok(Value::Object(object)),
    }
}

/// Flatten an informational payload into log-friendly messages
pub fn messages(payload: Value) -> Vec<String> {
    fn text(value: Value) -> String {
        match value {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    match payload {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(text).collect(),
        Value::Object(object) => object
            .into_iter()
            .filter(|(key, _)| key != "success")
            .map(|(_, value)| text(value))
            .collect(),
        other => vec![text(other)],
    }
}
