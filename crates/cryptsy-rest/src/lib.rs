//! REST API client for the Cryptsy cryptocurrency exchange
//!
//! # Features
//!
//! - **Public market data**: market snapshots and order books, no credentials
//! - **Account**: balances, transactions, fee estimates, deposit addresses
//! - **Trading**: own trades and orders, order placement and cancellation
//! - **Façade**: the same trading calls addressed by pair label
//!
//! # Authentication
//!
//! Private calls are form-encoded POST bodies signed with HMAC-SHA512 over the
//! exact body bytes, sent with the `Key` and `Sign` headers. Each session
//! carries a nonce that strictly increases across its calls.
//!
//! # Example
//!
//! ```no_run
//! use cryptsy_rest::{AuthenticatedSession, ClientConfig, Credentials, PublicClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoint (no auth required)
//!     let public = PublicClient::new()?;
//!     let books = public.order_data().await?;
//!     println!("{} order books", books.len());
//!
//!     // Private endpoint (auth required)
//!     let creds = Credentials::from_env()?;
//!     let mut session = AuthenticatedSession::connect(creds, ClientConfig::default()).await?;
//!     let info = session.get_info().await?;
//!     println!("Balances: {:?}", info.balances_available);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
pub mod facade;
pub mod public;
pub mod response;
pub mod session;
pub mod types;

// Re-export main types
pub use config::{ClientConfig, DEFAULT_PRIVATE_URL, DEFAULT_PUBLIC_URL};
pub use error::{RestError, RestResult};
pub use facade::TradeApi;
pub use public::PublicClient;
pub use session::AuthenticatedSession;

pub use types::{
    // Account
    AccountInfo, FeeEstimate, Transaction,
    // Markets
    Depth, Market, MarketOrders, PairSnapshot, PriceLevel,
};

pub use cryptsy_auth::{Credentials, KeyStore, NonceCounter};
pub use cryptsy_types::{MarketId, MarketMap, Order, OrderId, Side, Trade, TradeId};
