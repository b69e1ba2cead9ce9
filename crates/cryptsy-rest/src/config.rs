//! Client configuration

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use crate::error::RestResult;

/// Private (authenticated) trading endpoint
pub const DEFAULT_PRIVATE_URL: &str = "https://www.cryptsy.com/api";

/// Public market data endpoint
pub const DEFAULT_PUBLIC_URL: &str = "http://pubapi.cryptsy.com/api.php";

const DEFAULT_USER_AGENT: &str = concat!("cryptsy-rest/", env!("CARGO_PKG_VERSION"));

/// Client configuration
///
/// Built once and handed to each client, which keeps its own copy. Nothing
/// here changes after a client is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL for signed POST requests
    pub private_url: String,
    /// URL for public GET requests
    pub public_url: String,
    /// Request timeout; `None` leaves the HTTP client's default (no timeout)
    pub timeout: Option<Duration>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            private_url: DEFAULT_PRIVATE_URL.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the private endpoint URL
    pub fn with_private_url(mut self, url: impl Into<String>) -> Self {
        self.private_url = url.into();
        self
    }

    /// Set the public endpoint URL
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the HTTP client carrying the shared request headers
    pub(crate) fn http_client(&self) -> RestResult<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}
