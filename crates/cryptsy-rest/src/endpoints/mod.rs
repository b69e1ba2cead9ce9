//! API endpoint implementations
//!
//! Each submodule adds one group of private calls to
//! [`AuthenticatedSession`](crate::AuthenticatedSession).

pub mod account;
pub mod market;
pub mod trading;

use cryptsy_types::Side;

/// `ordertype` parameter value for a side
pub(crate) fn order_type_param(side: Side) -> &'static str {
    match side {
        Side::Buy => "Buy",
        Side::Sell => "Sell",
    }
}
