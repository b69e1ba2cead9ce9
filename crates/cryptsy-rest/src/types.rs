//! Typed responses for Cryptsy REST endpoints

use chrono::{DateTime, NaiveDateTime, Utc};
use cryptsy_types::record::{
    as_record, int_or_string, optional_decimal, optional_text, optional_timestamp,
    required_integer, RawRecord,
};
use cryptsy_types::{
    parse_order_list, parse_trade_list, MarketId, Order, ParseError, ParseResult, RecordContext,
    Side, Trade,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Unix seconds, quoted or bare, as a UTC time
fn unix_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let secs: i64 = int_or_string::deserialize(deserializer)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", secs)))
}

/// Decode a payload into a typed response, reporting failures as parse errors
pub(crate) fn decode<T: serde::de::DeserializeOwned>(payload: Value) -> ParseResult<T> {
    serde_json::from_value(payload).map_err(ParseError::from)
}

// ============================================================================
// Account Types
// ============================================================================

/// Account overview from `getinfo`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Spendable balance per currency code
    pub balances_available: HashMap<String, Decimal>,
    /// Balance locked in open orders; empty when there are none
    #[serde(default)]
    pub balances_hold: HashMap<String, Decimal>,
    /// Server clock
    #[serde(rename = "servertimestamp", deserialize_with = "unix_time")]
    pub server_time: DateTime<Utc>,
    /// Server clock as rendered by the server
    #[serde(rename = "serverdatetime", default)]
    pub server_datetime: Option<String>,
    /// Server time zone name
    #[serde(rename = "servertimezone", default)]
    pub server_timezone: Option<String>,
    /// Number of open orders
    #[serde(rename = "openordercount", deserialize_with = "int_or_string::deserialize")]
    pub open_order_count: u32,
}

impl AccountInfo {
    /// Available balance of one currency, zero if the account never held it
    pub fn available(&self, currency: &str) -> Decimal {
        self.balances_available
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Deposit or withdrawal from `mytransactions`
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Currency code
    pub currency: String,
    /// When the transaction happened
    #[serde(rename = "timestamp", deserialize_with = "unix_time")]
    pub time: DateTime<Utc>,
    /// Server rendering of the time
    #[serde(default)]
    pub datetime: Option<String>,
    /// Server time zone name
    #[serde(default)]
    pub timezone: Option<String>,
    /// `Deposit` or `Withdrawal`
    #[serde(rename = "type")]
    pub kind: String,
    /// Address funds moved from/to
    #[serde(default)]
    pub address: Option<String>,
    /// Amount moved
    pub amount: Decimal,
    /// Fee charged
    pub fee: Decimal,
    /// Blockchain transaction id
    #[serde(default)]
    pub trxid: Option<String>,
}

/// Fee estimate from `calculatefees`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeeEstimate {
    /// Fee for the hypothetical order
    pub fee: Decimal,
    /// Net amount after the fee
    pub net: Decimal,
}

// ============================================================================
// Market Types
// ============================================================================

/// Market description from `getmarkets`
#[derive(Debug, Clone, Deserialize)]
pub struct Market {
    /// Market id
    #[serde(rename = "marketid", deserialize_with = "int_or_string::deserialize")]
    pub market_id: MarketId,
    /// Pair label, e.g. `LTC/BTC`
    pub label: String,
    /// Code of the traded currency
    #[serde(default)]
    pub primary_currency_code: String,
    /// Name of the traded currency
    #[serde(default)]
    pub primary_currency_name: String,
    /// Code of the quote currency
    #[serde(default)]
    pub secondary_currency_code: String,
    /// Name of the quote currency
    #[serde(default)]
    pub secondary_currency_name: String,
    /// When the market opened
    #[serde(with = "cryptsy_types::timestamp")]
    pub created: NaiveDateTime,
    /// Volume over the last 24 hours
    pub current_volume: Decimal,
    /// Last trade price
    pub last_trade: Decimal,
    /// 24h high
    pub high_trade: Decimal,
    /// 24h low
    pub low_trade: Decimal,
}

/// Open orders on both sides of one market, from `marketorders`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOrders {
    /// Resting sell orders
    pub sell_orders: Vec<Order>,
    /// Resting buy orders
    pub buy_orders: Vec<Order>,
}

impl MarketOrders {
    /// Build from a `marketorders` payload
    pub fn from_payload(payload: &Value, market_id: MarketId) -> ParseResult<Self> {
        let record = as_record(payload, "marketorders payload")?;
        let context = RecordContext::market(market_id);

        Ok(Self {
            sell_orders: parse_order_list(
                list_field(record, "sellorders")?,
                &context.with_side(Side::Sell),
            )?,
            buy_orders: parse_order_list(
                list_field(record, "buyorders")?,
                &context.with_side(Side::Buy),
            )?,
        })
    }
}

/// One aggregated order book level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(Decimal, Decimal)")]
pub struct PriceLevel {
    /// Level price
    pub price: Decimal,
    /// Total quantity at this price
    pub quantity: Decimal,
}

impl From<(Decimal, Decimal)> for PriceLevel {
    fn from((price, quantity): (Decimal, Decimal)) -> Self {
        Self { price, quantity }
    }
}

/// Aggregated order book from `depth`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Depth {
    /// Ask levels
    #[serde(default)]
    pub sell: Vec<PriceLevel>,
    /// Bid levels
    #[serde(default)]
    pub buy: Vec<PriceLevel>,
}

impl Depth {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.sell.iter().map(|level| level.price).min()
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.buy.iter().map(|level| level.price).max()
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Public Market Data Types
// ============================================================================

/// Per-pair snapshot from the public API
///
/// `marketdatav2` fills in everything; `orderdata` only the identity fields
/// and the two order lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSnapshot {
    /// Pair label
    pub label: String,
    /// Market id
    pub market_id: MarketId,
    /// Code of the traded currency
    pub primary_code: Option<String>,
    /// Name of the traded currency
    pub primary_name: Option<String>,
    /// Code of the quote currency
    pub secondary_code: Option<String>,
    /// Name of the quote currency
    pub secondary_name: Option<String>,
    /// Last trade price
    pub last_trade_price: Option<Decimal>,
    /// Last trade time
    pub last_trade_time: Option<NaiveDateTime>,
    /// 24h volume
    pub volume: Option<Decimal>,
    /// Most recent trades
    pub recent_trades: Vec<Trade>,
    /// Resting sell orders
    pub sell_orders: Vec<Order>,
    /// Resting buy orders
    pub buy_orders: Vec<Order>,
}

impl PairSnapshot {
    /// Build from one per-pair record
    ///
    /// Trades and orders take the pair's own market id; `fallback_label` is
    /// used when the record has no `label`.
    pub fn from_record(record: &RawRecord, fallback_label: &str) -> ParseResult<Self> {
        let market_id: MarketId = required_integer(record, &["marketid"])?;
        let context = RecordContext::market(market_id);

        Ok(Self {
            label: optional_text(record, "label").unwrap_or_else(|| fallback_label.to_string()),
            market_id,
            primary_code: optional_text(record, "primarycode"),
            primary_name: optional_text(record, "primaryname"),
            secondary_code: optional_text(record, "secondarycode"),
            secondary_name: optional_text(record, "secondaryname"),
            last_trade_price: optional_decimal(record, "lasttradeprice")?,
            last_trade_time: optional_timestamp(record, "lasttradetime")?,
            volume: optional_decimal(record, "volume")?,
            recent_trades: parse_trade_list(list_field(record, "recenttrades")?, &context)?,
            sell_orders: parse_order_list(
                list_field(record, "sellorders")?,
                &context.with_side(Side::Sell),
            )?,
            buy_orders: parse_order_list(
                list_field(record, "buyorders")?,
                &context.with_side(Side::Buy),
            )?,
        })
    }
}

/// List-valued field; absent or `null` means empty
pub(crate) fn list_field<'a>(record: &'a RawRecord, key: &str) -> ParseResult<&'a [Value]> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ParseError::UnexpectedShape(format!("{} is not a list", key))),
    }
}
