//! Authenticated session
//!
//! One session owns one set of credentials, one nonce counter and the market
//! map fetched when it connects. Every private call goes through
//! [`AuthenticatedSession::request`], which takes `&mut self` so a nonce is
//! drawn, signed and sent before the next one can be drawn.

use cryptsy_auth::{Credentials, NonceCounter, RequestSigner};
use cryptsy_types::{MarketId, MarketMap};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::response::unwrap_envelope;

/// Signed session against the private trading endpoint
///
/// # Example
///
/// ```no_run
/// use cryptsy_rest::{AuthenticatedSession, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut session =
///         AuthenticatedSession::from_key_file("cryptsy.keys", ClientConfig::default()).await?;
///
///     let info = session.get_info().await?;
///     println!("BTC available: {}", info.available("BTC"));
///
///     let ltc = session.market_id("LTC/BTC").expect("listed market");
///     for order in session.my_orders(ltc).await? {
///         println!("{:?}", order);
///     }
///     Ok(())
/// }
/// ```
pub struct AuthenticatedSession {
    http_client: Client,
    config: ClientConfig,
    credentials: Credentials,
    nonce: NonceCounter,
    markets: MarketMap,
}

impl AuthenticatedSession {
    /// Connect with fresh nonces starting at 1
    ///
    /// Calls `getmarkets` once to build the market map.
    pub async fn connect(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        Self::connect_with_nonce(credentials, config, NonceCounter::new()).await
    }

    /// Connect, continuing from an existing nonce counter
    pub async fn connect_with_nonce(
        credentials: Credentials,
        config: ClientConfig,
        nonce: NonceCounter,
    ) -> RestResult<Self> {
        let mut session = Self {
            http_client: config.http_client()?,
            config,
            credentials,
            nonce,
            markets: MarketMap::new(),
        };

        let markets = session.get_markets().await?;
        session.markets = markets
            .into_iter()
            .map(|market| (market.label, market.market_id))
            .collect();

        info!(markets = session.markets.len(), "Connected Cryptsy session");

        Ok(session)
    }

    /// Connect with the first key pair in a key file
    pub async fn from_key_file(path: impl AsRef<Path>, config: ClientConfig) -> RestResult<Self> {
        let credentials = Credentials::from_key_file(path)?;
        Self::connect(credentials, config).await
    }

    /// Connect with credentials from `CRYPTSY_API_KEY` / `CRYPTSY_API_SECRET`
    pub async fn from_env(config: ClientConfig) -> RestResult<Self> {
        let credentials = Credentials::from_env()?;
        Self::connect(credentials, config).await
    }

    /// Pair label ↔ market id map fetched at connect time
    pub fn markets(&self) -> &MarketMap {
        &self.markets
    }

    /// Market id for a pair label
    pub fn market_id(&self, label: &str) -> Option<MarketId> {
        self.markets.id(label)
    }

    /// Pair label for a market id
    pub fn label(&self, market_id: MarketId) -> Option<&str> {
        self.markets.label(market_id)
    }

    /// Last nonce sent
    pub fn last_nonce(&self) -> u64 {
        self.nonce.last()
    }

    /// Configuration this session was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// API key this session signs with
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign and send one private API call, returning its payload
    ///
    /// # Errors
    /// - [`RestError::Http`] on connection failure or non-2xx status
    /// - [`RestError::Api`] when the server reports `success: "0"`
    /// - [`RestError::Parse`] when the body is not a valid envelope
    pub async fn request(&mut self, method: &str, params: &[(&str, String)]) -> RestResult<Value> {
        let nonce = self.nonce.next();
        let signed = RequestSigner::new(&self.credentials, nonce).sign_request(method, params)?;

        debug!(method, nonce, "Making authenticated request");

        let body = self
            .http_client
            .post(&self.config.private_url)
            .header("Key", self.credentials.api_key())
            .header("Sign", signed.signature)
            .body(signed.body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let parsed: Value = serde_json::from_str(&body)?;
        unwrap_envelope(parsed).map_err(|err| {
            if let RestError::Api { message } = &err {
                debug!(method, nonce, error = %message, "API call rejected");
            }
            err
        })
    }
}

impl std::fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("credentials", &self.credentials)
            .field("private_url", &self.config.private_url)
            .field("last_nonce", &self.nonce.last())
            .field("markets", &self.markets.len())
            .finish()
    }
}
