//! Executed trades

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::Side;
use crate::error::{ParseError, ParseResult};
use crate::market::{MarketId, OrderId, TradeId};
use crate::record::{
    as_record, optional_decimal, optional_integer, optional_side, optional_text, parse_integer,
    required_decimal, required_integer, required_timestamp, text, RawRecord, RecordContext,
};

/// An executed trade, either our own or market-wide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Market the trade happened in
    pub market_id: MarketId,
    /// Trade id (`tradeid` or `id`)
    pub id: TradeId,
    /// Execution time (`datetime` or `time`)
    #[serde(with = "crate::time::timestamp")]
    pub time: NaiveDateTime,
    /// Executed quantity
    pub quantity: Decimal,
    /// Total value
    pub total: Decimal,
    /// Execution price (`tradeprice` or `price`)
    pub price: Decimal,
    /// Side of the order that initiated the trade
    pub initiate_ordertype: Option<Side>,
    /// Our side of the trade, on private endpoints
    pub trade_type: Option<String>,
    /// Fee charged, on private endpoints
    pub fee: Option<Decimal>,
    /// Our order that took part in the trade
    pub order_id: Option<OrderId>,
}

impl Trade {
    /// Build a trade from one raw response record
    pub fn from_record(record: &RawRecord, context: &RecordContext) -> ParseResult<Self> {
        let market_id = match context.market_id {
            Some(id) => id,
            None => {
                let raw = text(record, "marketid").ok_or_else(|| ParseError::missing("marketid"))?;
                parse_integer("marketid", &raw)?
            }
        };

        Ok(Self {
            market_id,
            id: required_integer(record, &["tradeid", "id"])?,
            time: required_timestamp(record, &["datetime", "time"])?,
            quantity: required_decimal(record, &["quantity"])?,
            total: required_decimal(record, &["total"])?,
            price: required_decimal(record, &["tradeprice", "price"])?,
            initiate_ordertype: optional_side(record, "initiate_ordertype")?,
            trade_type: optional_text(record, "tradetype"),
            fee: optional_decimal(record, "fee")?,
            order_id: optional_integer(record, "order_id")?,
        })
    }
}

/// Build every trade in a response list, injecting `context` into each
pub fn parse_trade_list(records: &[Value], context: &RecordContext) -> ParseResult<Vec<Trade>> {
    records
        .iter()
        .map(|value| Trade::from_record(as_record(value, "trade")?, context))
        .collect()
}
