//! Error types for response normalization

use thiserror::Error;

/// A response field could not be turned into its typed value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Required field absent under every accepted name
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// Field is not a valid decimal number
    #[error("Invalid decimal in {field}: {value:?}")]
    InvalidDecimal { field: String, value: String },

    /// Field is not a valid integer
    #[error("Invalid integer in {field}: {value:?}")]
    InvalidInteger { field: String, value: String },

    /// Field is not `buy` or `sell`
    #[error("Invalid order side in {field}: {value:?}")]
    InvalidSide { field: String, value: String },

    /// Field does not match `YYYY-MM-DD HH:MM:SS`
    #[error("Invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: String, value: String },

    /// Response payload does not have the expected structure
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Response body is not valid JSON or does not match the expected type
    #[error("Invalid JSON: {0}")]
    Json(String),
}

impl ParseError {
    /// Create a missing field error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidDecimal { field, .. }
            | Self::InvalidInteger { field, .. }
            | Self::InvalidSide { field, .. }
            | Self::InvalidTimestamp { field, .. } => Some(field),
            Self::UnexpectedShape(_) | Self::Json(_) => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for normalization
pub type ParseResult<T> = Result<T, ParseError>;
