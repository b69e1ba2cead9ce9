//! Credentials and request signing for the Cryptsy API
//!
//! This crate loads API key pairs and produces the signed request bodies the
//! private trading endpoint expects. It performs no network I/O.
//!
//! # Example
//!
//! ```no_run
//! use cryptsy_auth::{KeyStore, NonceCounter, RequestSigner};
//!
//! # fn main() -> Result<(), cryptsy_auth::AuthError> {
//! let keys = KeyStore::from_file("cryptsy.keys")?;
//! let creds = keys.first().ok_or(cryptsy_auth::AuthError::EmptyKeyFile)?;
//!
//! let mut nonce = NonceCounter::new();
//! let signed = RequestSigner::new(creds, nonce.next()).sign_request("getinfo", &[])?;
//! println!("{} -> {}", signed.body, signed.signature);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod keys;
mod nonce;

pub use credentials::{Credentials, RequestSigner, SignedRequest, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use keys::KeyStore;
pub use nonce::NonceCounter;
