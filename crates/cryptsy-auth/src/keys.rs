//! Key file loading
//!
//! A key file is plain text: an API key on one line, its secret on the next,
//! repeated for each pair. A blank key line (or end of file) ends the list.

use std::path::Path;

use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// Key/secret pairs loaded from a key file, indexed by key
#[derive(Clone, Default)]
pub struct KeyStore {
    entries: Vec<Credentials>,
}

impl KeyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse key file contents
    ///
    /// Surrounding whitespace on each line is ignored. A key listed twice
    /// keeps its last secret.
    pub fn parse(contents: &str) -> AuthResult<Self> {
        let mut store = Self::new();
        let mut lines = contents.lines().map(str::trim);

        while let Some(key) = lines.next() {
            if key.is_empty() {
                break;
            }
            let secret = match lines.next() {
                Some(secret) if !secret.is_empty() => secret,
                _ => {
                    return Err(AuthError::InvalidKeyFile(format!(
                        "key {} has no secret line",
                        redact(key)
                    )))
                }
            };
            store.insert(Credentials::new(key, secret));
        }

        Ok(store)
    }

    /// Load a key file from disk
    pub fn from_file(path: impl AsRef<Path>) -> AuthResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let store = Self::parse(&contents)?;
        debug!("Loaded {} key(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Add or replace a key pair
    pub fn insert(&mut self, credentials: Credentials) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.api_key() == credentials.api_key())
        {
            Some(existing) => *existing = credentials,
            None => self.entries.push(credentials),
        }
    }

    /// Credentials for a given API key
    pub fn get(&self, api_key: &str) -> Option<&Credentials> {
        self.entries.iter().find(|c| c.api_key() == api_key)
    }

    /// Credentials for a given API key, or an error naming it
    pub fn require(&self, api_key: &str) -> AuthResult<&Credentials> {
        self.get(api_key)
            .ok_or_else(|| AuthError::KeyNotFound(redact(api_key)))
    }

    /// First pair in file order
    pub fn first(&self) -> Option<&Credentials> {
        self.entries.first()
    }

    /// API keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Credentials::api_key)
    }

    /// Iterate over all pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = &Credentials> {
        self.entries.iter()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no pairs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

fn redact(key: &str) -> String {
    format!("{}...", &key[..key.char_indices().nth(8).map_or(key.len(), |(i, _)| i)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_single_pair() {
        let store = KeyStore::parse("abc123\nsecretXYZ\n").unwrap();
        assert_eq!(store.len(), 1);

        let creds = store.get("abc123").unwrap();
        assert_eq!(creds.api_key(), "abc123");
        assert_eq!(creds.secret().expose_secret(), "secretXYZ");
    }

    #[test]
    fn test_multiple_pairs_keep_file_order() {
        let store = KeyStore::parse("k1\ns1\nk2\ns2\n").unwrap();
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["k1", "k2"]);
        assert_eq!(store.first().unwrap().api_key(), "k1");
        assert_eq!(store.get("k2").unwrap().secret().expose_secret(), "s2");
    }

    #[test]
    fn test_blank_line_terminates() {
        let store = KeyStore::parse("k1\ns1\n\nk2\ns2\n").unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("k2").is_none());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let store = KeyStore::parse("  k1  \r\n\ts1 \r\n").unwrap();
        assert_eq!(store.get("k1").unwrap().secret().expose_secret(), "s1");
    }

    #[test]
    fn test_duplicate_key_keeps_last_secret() {
        let store = KeyStore::parse("k1\nold\nk1\nnew\n").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k1").unwrap().secret().expose_secret(), "new");
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        assert!(matches!(
            KeyStore::parse("lonelykey\n"),
            Err(AuthError::InvalidKeyFile(_))
        ));
    }

    #[test]
    fn test_empty_file() {
        let store = KeyStore::parse("").unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.require("k"), Err(AuthError::KeyNotFound(_))));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("cryptsy-keys-{}.txt", std::process::id()));
        std::fs::write(&path, "abc123\nsecretXYZ\n").unwrap();
        let store = KeyStore::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.first().unwrap().api_key(), "abc123");
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            KeyStore::from_file("/nonexistent/cryptsy/keys.txt"),
            Err(AuthError::Io(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let store = KeyStore::parse("abc123\nsecretXYZ\n").unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains("secretXYZ"));
    }
}
