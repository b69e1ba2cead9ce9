//! Limit orders

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::Side;
use crate::error::{ParseError, ParseResult};
use crate::market::{MarketId, OrderId};
use crate::record::{
    as_record, optional_decimal, optional_integer, optional_timestamp, parse_integer, parse_side,
    required_decimal, text, RawRecord, RecordContext,
};

/// A resting or historical limit order
///
/// Order lists come from several endpoints (`myorders`, `allmyorders`,
/// `marketorders`, the public order books) that disagree on which fields
/// they include. Fields only some endpoints return are `Option`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Market the order rests in
    pub market_id: MarketId,
    /// Buy or sell
    pub side: Side,
    /// Quantity still on the book
    pub quantity: Decimal,
    /// Total value (quantity × price)
    pub total: Decimal,
    /// Limit price
    pub price: Decimal,
    /// Order id, when the endpoint reports it
    pub id: Option<OrderId>,
    /// Creation time, when the endpoint reports it
    #[serde(default, with = "crate::time::opt_timestamp")]
    pub created: Option<NaiveDateTime>,
    /// Quantity at placement, for partially filled orders
    pub original_quantity: Option<Decimal>,
    /// Remaining quantity as tracked by the caller; never set by the parser
    pub remaining: Option<Decimal>,
}

impl Order {
    /// Build an order from one raw response record
    ///
    /// The price is read from `price`, or from `<side>price` (`buyprice`,
    /// `sellprice`) on endpoints that prefix it.
    pub fn from_record(record: &RawRecord, context: &RecordContext) -> ParseResult<Self> {
        let market_id = match context.market_id {
            Some(id) => id,
            None => {
                let raw = text(record, "marketid").ok_or_else(|| ParseError::missing("marketid"))?;
                parse_integer("marketid", &raw)?
            }
        };

        let side = match context.side {
            Some(side) => side,
            None => {
                let raw =
                    text(record, "ordertype").ok_or_else(|| ParseError::missing("ordertype"))?;
                parse_side("ordertype", &raw)?
            }
        };

        let prefixed_price = format!("{}price", side.as_str());

        Ok(Self {
            market_id,
            side,
            quantity: required_decimal(record, &["quantity"])?,
            total: required_decimal(record, &["total"])?,
            price: required_decimal(record, &["price", prefixed_price.as_str()])?,
            id: optional_integer(record, "orderid")?,
            created: optional_timestamp(record, "created")?,
            original_quantity: optional_decimal(record, "orig_quantity")?,
            remaining: None,
        })
    }

    /// Set the caller-tracked remaining quantity
    pub fn with_remaining(mut self, remaining: Decimal) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Quantity already executed, if the original quantity is known
    pub fn filled_quantity(&self) -> Option<Decimal> {
        self.original_quantity.map(|original| original - self.quantity)
    }
}

/// Build every order in a response list, injecting `context` into each
pub fn parse_order_list(records: &[Value], context: &RecordContext) -> ParseResult<Vec<Order>> {
    records
        .iter()
        .map(|value| Order::from_record(as_record(value, "order")?, context))
        .collect()
}
