//! Error types for REST API operations

use cryptsy_auth::AuthError;
use cryptsy_types::ParseError;
use reqwest::StatusCode;

/// Errors that can occur during REST API operations
///
/// Nothing is retried: every error reaches the caller of the operation that
/// produced it.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Transport failure: connection error or non-2xx status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered but flagged the operation as failed
    #[error("API error: {message}")]
    Api {
        /// Error string exactly as the server sent it
        message: String,
    },

    /// A response field could not be normalized
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid request parameters, rejected before any request is sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pair label not present in the session's market map
    #[error("Unknown pair: {0}")]
    UnknownPair(String),

    /// Credentials could not be loaded or encoded
    #[error("Credential error: {0}")]
    Auth(#[from] AuthError),
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(ParseError::from(err))
    }
}

impl RestError {
    /// Create an API error from the server's error string
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Check if the server rejected the operation
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if the caller supplied unusable parameters
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidParameter(_) | Self::UnknownPair(_))
    }

    /// HTTP status, for transport errors caused by a non-2xx response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Server error string, for API errors
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error() {
        let err = RestError::api("Invalid API key");
        assert!(err.is_api());
        assert!(!err.is_transport());
        assert_eq!(err.api_message(), Some("Invalid API key"));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "API error: Invalid API key");
    }

    #[test]
    fn test_usage_errors() {
        assert!(RestError::UnknownPair("XYZ/BTC".into()).is_usage());
        assert!(RestError::InvalidParameter("currency".into()).is_usage());
        assert!(!RestError::Parse(ParseError::missing("price")).is_usage());
    }

    #[test]
    fn test_json_error_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = RestError::from(json_err);
        assert!(matches!(err, RestError::Parse(ParseError::Json(_))));
    }
}
