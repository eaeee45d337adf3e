//! Signed REST client for the BitcoinAverage API
//!
//! Every call is a `GET` carrying a fresh `X-signature` header computed from
//! the client's [`Credentials`]. Besides the market data endpoints, this crate
//! hosts the [`TicketBroker`] that issues websocket tickets.
//!
//! # Example
//!
//! ```no_run
//! use bavg_rest::{RestClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new(Credentials::from_env()?)?;
//!
//!     let tickers = client.tickers(&["BTC", "LTC"], &["USD", "GBP"]).await?;
//!     for (pair, ticker) in &tickers {
//!         println!("{}: last = {}", pair, ticker.last);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod ticket;

// Re-export main types
pub use bavg_auth::Credentials;
pub use client::{request_url, ClientConfig, RestClient, DEFAULT_API_BASE, SIGNATURE_HEADER};
pub use endpoints::MarketEndpoints;
pub use error::{RestError, RestResult};
pub use ticket::{TicketBroker, TICKET_PATH};
