//! Public market data client
//!
//! Unauthenticated, stateless GET requests; no nonce, no signing. Every call
//! is independent and can be repeated freely by the caller.

use cryptsy_types::record::as_record;
use cryptsy_types::{MarketId, ParseError};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::RestResult;
use crate::response::unwrap_envelope;
use crate::types::PairSnapshot;

/// Client for the public market data endpoint
///
/// # Example
///
/// ```no_run
/// use cryptsy_rest::PublicClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PublicClient::new()?;
///     let ids = client.market_ids().await?;
///     let ltc = client.single_order_data(ids["LTC/BTC"]).await?;
///     println!("{} bids, {} asks", ltc.buy_orders.len(), ltc.sell_orders.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PublicClient {
    http_client: Client,
    config: ClientConfig,
}

impl PublicClient {
    /// Create a client with the default configuration
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        Ok(Self {
            http_client: config.http_client()?,
            config,
        })
    }

    /// Send one public call and unwrap its payload
    async fn request(&self, method: &str, params: &[(&str, String)]) -> RestResult<Value> {
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("method", method));

        debug!(method, "Making public request");

        let body = self
            .http_client
            .get(&self.config.public_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let parsed: Value = serde_json::from_str(&body)?;
        unwrap_envelope(parsed)
    }

    /// Snapshot of every market: recent trades, order books, last price, volume
    ///
    /// Keyed by pair label.
    #[instrument(skip(self))]
    pub async fn market_data(&self) -> RestResult<HashMap<String, PairSnapshot>> {
        let payload = self.request("marketdatav2", &[]).await?;
        Ok(snapshots_by_label(markets_object(&payload)?)?)
    }

    /// Snapshot of a single market
    #[instrument(skip(self))]
    pub async fn single_market_data(&self, market_id: MarketId) -> RestResult<PairSnapshot> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("singlemarketdata", &params).await?;
        Ok(only_snapshot(markets_object(&payload)?)?)
    }

    /// Order books of every market, keyed by pair label
    #[instrument(skip(self))]
    pub async fn order_data(&self) -> RestResult<HashMap<String, PairSnapshot>> {
        let payload = self.request("orderdata", &[]).await?;
        Ok(snapshots_by_label(as_record(&payload, "orderdata payload")?)?)
    }

    /// Order book of a single market
    #[instrument(skip(self))]
    pub async fn single_order_data(&self, market_id: MarketId) -> RestResult<PairSnapshot> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("orderdata", &params).await?;
        Ok(only_snapshot(as_record(&payload, "orderdata payload")?)?)
    }

    /// Pair label → market id, taken from the full market snapshot
    #[instrument(skip(self))]
    pub async fn market_ids(&self) -> RestResult<HashMap<String, MarketId>> {
        Ok(self
            .market_data()
            .await?
            .into_iter()
            .map(|(label, snapshot)| (label, snapshot.market_id))
            .collect())
    }
}

/// The `markets` object inside a market data payload
fn markets_object(payload: &Value) -> Result<&serde_json::Map<String, Value>, ParseError> {
    let markets = as_record(payload, "market data payload")?
        .get("markets")
        .ok_or_else(|| ParseError::missing("markets"))?;
    as_record(markets, "markets")
}

fn snapshots_by_label(
    pairs: &serde_json::Map<String, Value>,
) -> Result<HashMap<String, PairSnapshot>, ParseError> {
    pairs
        .iter()
        .map(|(key, info)| {
            let snapshot = PairSnapshot::from_record(as_record(info, key)?, key)?;
            Ok((snapshot.label.clone(), snapshot))
        })
        .collect()
}

fn only_snapshot(pairs: &serde_json::Map<String, Value>) -> Result<PairSnapshot, ParseError> {
    let (key, info) = pairs
        .iter()
        .next()
        .ok_or_else(|| ParseError::UnexpectedShape("no market in response".to_string()))?;
    PairSnapshot::from_record(as_record(info, key)?, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshots_keyed_by_label_not_wrapper_key() {
        let payload = json!({
            "LTC": {"marketid": "3", "label": "LTC/BTC", "sellorders": [], "buyorders": []},
            "DOGE": {"marketid": "132", "label": "DOGE/BTC", "sellorders": [], "buyorders": []}
        });
        let snapshots = snapshots_by_label(payload.as_object().unwrap()).unwrap();
        assert_eq!(snapshots["LTC/BTC"].market_id, 3);
        assert_eq!(snapshots["DOGE/BTC"].market_id, 132);
    }

    #[test]
    fn test_only_snapshot_on_empty_payload() {
        let payload = json!({});
        assert!(matches!(
            only_snapshot(payload.as_object().unwrap()),
            Err(ParseError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_markets_object_missing() {
        assert_eq!(
            markets_object(&json!({"other": {}})).unwrap_err(),
            ParseError::missing("markets")
        );
    }
}
