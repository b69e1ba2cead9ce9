//! Shared types for the Cryptsy exchange API
//!
//! This crate holds the typed records every other crate in the workspace
//! produces, and the rules for building them out of Cryptsy's loosely typed
//! JSON. It does no I/O.
//!
//! # Key Types
//!
//! - [`Order`], [`Trade`] - Normalized order and trade records
//! - [`RecordContext`] - Market id / side injected into every record of a batch
//! - [`MarketMap`] - Pair label ↔ market id mapping
//! - [`Side`] - Buy / sell
//! - [`ParseError`] - Field coercion failures
//!
//! # Example
//!
//! ```
//! use cryptsy_types::{Order, RecordContext, Side};
//! use serde_json::json;
//!
//! let raw = json!({"quantity": "1.5", "total": "3.0", "sellprice": "2.0"});
//! let context = RecordContext::market(5).with_side(Side::Sell);
//! let order = Order::from_record(raw.as_object().unwrap(), &context).unwrap();
//! assert_eq!(order.price.to_string(), "2.0");
//! ```

pub mod enums;
pub mod error;
pub mod market;
pub mod order;
pub mod record;
pub mod time;
pub mod trade;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use market::*;
pub use order::{parse_order_list, Order};
pub use record::{RawRecord, RecordContext};
pub use time::{format_timestamp, opt_timestamp, parse_timestamp, timestamp, TIMESTAMP_FORMAT};
pub use trade::{parse_trade_list, Trade};

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
