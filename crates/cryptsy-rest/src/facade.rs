//! Simplified trading workflow on top of [`AuthenticatedSession`]
//!
//! Works in pair labels instead of market ids and tracks a remaining
//! quantity on the orders it hands back.

use cryptsy_auth::Credentials;
use cryptsy_types::{MarketId, Order, OrderId, Side};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::session::AuthenticatedSession;
use crate::types::PriceLevel;

/// Pair-label trading façade
///
/// Dereferences to the underlying [`AuthenticatedSession`]. Where both
/// define a method (`depth`, `cancel_order`) the pair-label version here
/// wins; reach the raw one through [`TradeApi::session_mut`].
///
/// # Example
///
/// ```no_run
/// use cryptsy_rest::{ClientConfig, TradeApi};
/// use cryptsy_types::Side;
/// use rust_decimal_macros::dec;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut api = TradeApi::from_key_file("cryptsy.keys", ClientConfig::default()).await?;
///     let order = api
///         .place_order("LTC/BTC", Side::Buy, dec!(0.025), dec!(1), Some(Duration::from_secs(2)))
///         .await?;
///     println!("remaining: {:?}", order.remaining);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TradeApi {
    session: AuthenticatedSession,
}

impl TradeApi {
    /// Wrap an existing session
    pub fn new(session: AuthenticatedSession) -> Self {
        Self { session }
    }

    /// Connect a new session and wrap it
    pub async fn connect(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        Ok(Self::new(AuthenticatedSession::connect(credentials, config).await?))
    }

    /// Connect with the first key pair in a key file
    pub async fn from_key_file(
        path: impl AsRef<Path>,
        config: ClientConfig,
    ) -> RestResult<Self> {
        Ok(Self::new(
            AuthenticatedSession::from_key_file(path, config).await?,
        ))
    }

    /// Underlying session
    pub fn session_mut(&mut self) -> &mut AuthenticatedSession {
        &mut self.session
    }

    /// Unwrap the session
    pub fn into_session(self) -> AuthenticatedSession {
        self.session
    }

    /// Every tradable pair label, sorted
    pub fn all_pairs(&self) -> Vec<&str> {
        self.session.markets().labels()
    }

    fn pair_id(&self, pair: &str) -> RestResult<MarketId> {
        self.session
            .market_id(pair)
            .ok_or_else(|| RestError::UnknownPair(pair.to_string()))
    }

    /// Available balance per currency code
    ///
    /// Keys are the bare codes from `getinfo` (`BTC`, not `balance_BTC`);
    /// no prefix is added.
    #[instrument(skip(self))]
    pub async fn funds(&mut self) -> RestResult<HashMap<String, Decimal>> {
        Ok(self.session.get_info().await?.balances_available)
    }

    /// Place a limit order by pair label
    ///
    /// The returned order starts with `remaining = quantity`. With a non-zero
    /// `update_delay`, waits that long and looks the order up in the open
    /// orders of its market:
    /// - still open: the server's view of the order, `remaining` = its quantity
    /// - gone: assumed filled, `remaining` and `quantity` set to zero
    ///
    /// An order cancelled by someone else in the meantime is also "gone"; the
    /// two cases cannot be told apart here.
    #[instrument(skip(self))]
    pub async fn place_order(
        &mut self,
        pair: &str,
        side: Side,
        price: Decimal,
        quantity: Decimal,
        update_delay: Option<Duration>,
    ) -> RestResult<Order> {
        let market_id = self.pair_id(pair)?;
        let placed = self
            .session
            .create_order(market_id, side, quantity, price)
            .await?;
        let placed_quantity = placed.quantity;
        let mut order = placed.with_remaining(placed_quantity);

        let Some(delay) = update_delay.filter(|delay| !delay.is_zero()) else {
            return Ok(order);
        };

        tokio::time::sleep(delay).await;

        let open_orders = self.session.my_orders(market_id).await?;
        match open_orders.into_iter().find(|open| open.id == order.id) {
            Some(open) => {
                debug!(order_id = ?open.id, quantity = %open.quantity, "Order still open");
                let open_quantity = open.quantity;
                order = open.with_remaining(open_quantity);
            }
            None => {
                warn!(order_id = ?order.id, "Order not open any more, assuming filled");
                order.remaining = Some(Decimal::ZERO);
                order.quantity = Decimal::ZERO;
            }
        }

        Ok(order)
    }

    /// Aggregated order book by pair label
    ///
    /// # Returns
    /// `(sell levels, buy levels)`
    #[instrument(skip(self))]
    pub async fn depth(
        &mut self,
        pair: &str,
    ) -> RestResult<(Vec<PriceLevel>, Vec<PriceLevel>)> {
        let market_id = self.pair_id(pair)?;
        let depth = self.session.depth(market_id).await?;
        Ok((depth.sell, depth.buy))
    }

    /// All open orders, each with `remaining` set to its quantity
    #[instrument(skip(self))]
    pub async fn order_list(&mut self) -> RestResult<Vec<Order>> {
        Ok(self
            .session
            .all_my_orders()
            .await?
            .into_iter()
            .map(|order| {
                let quantity = order.quantity;
                order.with_remaining(quantity)
            })
            .collect())
    }

    /// Cancel one order
    #[instrument(skip(self))]
    pub async fn cancel_order(&mut self, order_id: OrderId) -> RestResult<Vec<String>> {
        self.session.cancel_order(order_id).await
    }
}

impl Deref for TradeApi {
    type Target = AuthenticatedSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl DerefMut for TradeApi {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}
