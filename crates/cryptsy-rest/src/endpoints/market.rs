//! Private market data endpoints

use cryptsy_types::{parse_trade_list, MarketId, RecordContext, Trade};
use tracing::instrument;

use crate::error::RestResult;
use crate::session::AuthenticatedSession;
use crate::types::{decode, Depth, Market, MarketOrders};

impl AuthenticatedSession {
    /// Get every market with its id, label and 24h statistics
    #[instrument(skip(self))]
    pub async fn get_markets(&mut self) -> RestResult<Vec<Market>> {
        let payload = self.request("getmarkets", &[]).await?;
        Ok(decode(payload)?)
    }

    /// Get the last trades in a market
    #[instrument(skip(self))]
    pub async fn market_trades(&mut self, market_id: MarketId) -> RestResult<Vec<Trade>> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("markettrades", &params).await?;
        let records: Vec<serde_json::Value> = decode(payload)?;
        Ok(parse_trade_list(&records, &RecordContext::market(market_id))?)
    }

    /// Get the resting orders on both sides of a market
    #[instrument(skip(self))]
    pub async fn market_orders(&mut self, market_id: MarketId) -> RestResult<MarketOrders> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("marketorders", &params).await?;
        Ok(MarketOrders::from_payload(&payload, market_id)?)
    }

    /// Get the aggregated order book of a market
    #[instrument(skip(self))]
    pub async fn depth(&mut self, market_id: MarketId) -> RestResult<Depth> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("depth", &params).await?;
        Ok(decode(payload)?)
    }
}
