//! Error types for credential loading and signing

/// Errors that can occur while loading credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Key file could not be read
    #[error("Failed to read key file: {0}")]
    Io(#[from] std::io::Error),

    /// Key file is not alternating key/secret lines
    #[error("Invalid key file: {0}")]
    InvalidKeyFile(String),

    /// Key file holds no key pairs
    #[error("Key file contains no keys")]
    EmptyKeyFile,

    /// Requested key is not in the store
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request parameters could not be form-encoded
    #[error("Failed to encode request parameters: {0}")]
    Encoding(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("CRYPTSY_API_KEY".to_string());
        assert!(err.to_string().contains("CRYPTSY_API_KEY"));
    }
}
