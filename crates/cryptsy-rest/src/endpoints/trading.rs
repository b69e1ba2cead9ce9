//! Private order and trade endpoints

use chrono::{Local, NaiveDateTime, Timelike};
use cryptsy_types::record::{as_record, required_integer};
use cryptsy_types::{
    parse_order_list, parse_trade_list, MarketId, Order, OrderId, RecordContext, Side, Trade,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{info, instrument};

use super::order_type_param;
use crate::error::{RestError, RestResult};
use crate::response::messages;
use crate::session::AuthenticatedSession;
use crate::types::decode;

impl AuthenticatedSession {
    /// Get our trades in one market
    ///
    /// # Arguments
    /// * `market_id` - Market to query
    /// * `limit` - Maximum number of trades (server default when `None`)
    #[instrument(skip(self))]
    pub async fn my_trades(
        &mut self,
        market_id: MarketId,
        limit: Option<u32>,
    ) -> RestResult<Vec<Trade>> {
        let mut params = vec![("marketid", market_id.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let payload = self.request("mytrades", &params).await?;
        let records: Vec<Value> = decode(payload)?;
        Ok(parse_trade_list(&records, &RecordContext::market(market_id))?)
    }

    /// Get our trades across all markets
    #[instrument(skip(self))]
    pub async fn all_my_trades(&mut self) -> RestResult<Vec<Trade>> {
        let payload = self.request("allmytrades", &[]).await?;
        let records: Vec<Value> = decode(payload)?;
        Ok(parse_trade_list(&records, &RecordContext::new())?)
    }

    /// Get our open orders in one market
    #[instrument(skip(self))]
    pub async fn my_orders(&mut self, market_id: MarketId) -> RestResult<Vec<Order>> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("myorders", &params).await?;
        let records: Vec<Value> = decode(payload)?;
        Ok(parse_order_list(&records, &RecordContext::market(market_id))?)
    }

    /// Get our open orders across all markets
    #[instrument(skip(self))]
    pub async fn all_my_orders(&mut self) -> RestResult<Vec<Order>> {
        let payload = self.request("allmyorders", &[]).await?;
        let records: Vec<Value> = decode(payload)?;
        Ok(parse_order_list(&records, &RecordContext::new())?)
    }

    /// Place a limit order
    ///
    /// The server only answers with the new order id and an HTML message, so
    /// the returned [`Order`] is assembled from the request itself: `total`
    /// is `quantity × price`, `created` is the local clock, and
    /// `original_quantity` equals `quantity`.
    ///
    /// # Errors
    /// [`RestError::InvalidParameter`] before any request when `quantity ×
    /// price` does not fit a `Decimal`.
    #[instrument(skip(self))]
    pub async fn create_order(
        &mut self,
        market_id: MarketId,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> RestResult<Order> {
        let total = quantity.checked_mul(price).ok_or_else(|| {
            RestError::InvalidParameter(format!(
                "order total overflows: {} x {}",
                quantity, price
            ))
        })?;

        let params = [
            ("marketid", market_id.to_string()),
            ("ordertype", order_type_param(side).to_string()),
            ("quantity", quantity.to_string()),
            ("price", price.to_string()),
        ];
        let payload = self.request("createorder", &params).await?;
        let record = as_record(&payload, "createorder payload")?;
        let order_id: OrderId = required_integer(record, &["orderid"])?;

        if let Some(more_info) = record.get("moreinfo").and_then(Value::as_str) {
            info!(order_id, "{}", strip_html(more_info));
        }

        Ok(Order {
            market_id,
            side,
            quantity,
            total,
            price,
            id: Some(order_id),
            created: Some(now_to_the_second()),
            original_quantity: Some(quantity),
            remaining: None,
        })
    }

    /// Cancel one order
    #[instrument(skip(self))]
    pub async fn cancel_order(&mut self, order_id: OrderId) -> RestResult<Vec<String>> {
        let params = [("orderid", order_id.to_string())];
        let payload = self.request("cancelorder", &params).await?;
        Ok(log_messages(payload))
    }

    /// Cancel all our orders in one market
    #[instrument(skip(self))]
    pub async fn cancel_market_orders(&mut self, market_id: MarketId) -> RestResult<Vec<String>> {
        let params = [("marketid", market_id.to_string())];
        let payload = self.request("cancelmarketorders", &params).await?;
        Ok(log_messages(payload))
    }

    /// Cancel all our orders in every market
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&mut self) -> RestResult<Vec<String>> {
        let payload = self.request("cancelallorders", &[]).await?;
        Ok(log_messages(payload))
    }
}

fn log_messages(payload: Value) -> Vec<String> {
    let messages = messages(payload);
    for message in &messages {
        info!("{}", message);
    }
    messages
}

fn now_to_the_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Turn the HTML `moreinfo` message into plain text
///
/// Line breaks become spaces and every other tag is dropped.
pub(crate) fn strip_html(message: &str) -> String {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let line_break = BREAK.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
    let tag = TAG.get_or_init(|| Regex::new(r"<[^<]+?>").expect("valid regex"));

    let spaced = line_break.replace_all(message, " ");
    tag.replace_all(&spaced, "").trim().to_string()
}
