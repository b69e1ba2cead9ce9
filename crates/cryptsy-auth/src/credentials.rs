//! API credentials and request signing
//!
//! Cryptsy private requests are signed with HMAC-SHA512, keyed by the API
//! secret, over the exact URL-encoded POST body. The lowercase hex digest goes
//! in the `Sign` header and the API key in the `Key` header.
//!
//! # Security
//!
//! Secrets are stored using the `secrecy` crate, so they are zeroized on drop
//! and never show up in `Debug` output.

use std::path::Path;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};
use crate::keys::KeyStore;

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "CRYPTSY_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "CRYPTSY_API_SECRET";

/// One API key and its HMAC secret
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// HMAC secret (zeroized on drop)
    secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `CRYPTSY_API_KEY` and `CRYPTSY_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Ok(Self::new(api_key, secret))
    }

    /// Load the first key pair from a key file
    pub fn from_key_file(path: impl AsRef<Path>) -> AuthResult<Self> {
        KeyStore::from_file(path)?
            .first()
            .cloned()
            .ok_or(AuthError::EmptyKeyFile)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the secret
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Sign a request body
    ///
    /// # Returns
    /// Lowercase hex HMAC-SHA512 of `body`, keyed by the secret
    pub fn sign(&self, body: &str) -> String {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.len(), |(i, _)| i);
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", &self.api_key[..visible]))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A signed, form-encoded request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// URL-encoded body, exactly as it must be sent
    pub body: String,
    /// Hex signature of `body`
    pub signature: String,
    /// Nonce embedded in `body`
    pub nonce: u64,
}

/// Request signer for building authenticated requests
///
/// Holds the nonce for a single request. The body lists the caller's
/// parameters first, then `method`, then `nonce`.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    nonce: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer for one request
    pub fn new(credentials: &'a Credentials, nonce: u64) -> Self {
        Self { credentials, nonce }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// URL-encode the full parameter set for `method`
    pub fn encode(&self, method: &str, params: &[(&str, String)]) -> AuthResult<String> {
        let nonce = self.nonce.to_string();
        let mut post_params: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        post_params.push(("method", method));
        post_params.push(("nonce", &nonce));

        serde_urlencoded::to_string(&post_params).map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Sign the request with the given POST body
    pub fn sign(&self, body: &str) -> String {
        self.credentials.sign(body)
    }

    /// Encode and sign in one step
    pub fn sign_request(&self, method: &str, params: &[(&str, String)]) -> AuthResult<SignedRequest> {
        let body = self.encode(method, params)?;
        let signature = self.sign(&body);
        Ok(SignedRequest {
            body,
            signature,
            nonce: self.nonce,
        })
    }
}
