//! High-level SDK for the BitcoinAverage market data API
//!
//! This crate ties the signed REST client and the authenticated websocket
//! streams together behind one [`BitcoinAverageClient`].
//!
//! # Quick Start
//!
//! ```no_run
//! use bavg_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BitcoinAverageClient::builder(Credentials::from_env()?)
//!         .with_data_capacity(16)
//!         .build()?;
//!
//!     // One-shot REST query
//!     let exchanges = client.exchanges(&["BTC"], &["USD"]).await?;
//!     println!("{} exchanges", exchanges.len());
//!
//!     // Live ticker stream
//!     let mut session = client.ticker_stream(["BTCUSD", "ETHUSD"]).await?;
//!     loop {
//!         tokio::select! {
//!             Some(ticker) = session.data.recv() => println!("last = {}", ticker.last),
//!             Some(err) = session.errors.recv() => {
//!                 eprintln!("stream error: {}", err);
//!                 if err.is_fatal() {
//!                     break;
//!                 }
//!             }
//!             else => break,
//!         }
//!     }
//!
//!     session.stop.stop_and_wait().await;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - **Signed requests**: every call carries a fresh HMAC-SHA256 signature
//! - **Ticket-authorized streams**: one ticket per socket, requested on demand
//! - **Backpressure**: bounded data channels throttle socket reads
//! - **Exact numbers**: prices keep the text the API sent

pub mod builder;
pub mod client;
pub mod error;
pub mod prelude;

// Re-export main types
pub use builder::BitcoinAverageClientBuilder;
pub use client::BitcoinAverageClient;
pub use error::{ConfigError, SdkError, SdkResult};

// Re-export commonly used types from dependencies
pub use bavg_rest::Credentials;
pub use bavg_types::{Decimal, Exchange, FixedDecimal, HistoryResolution, Pair, Ticker};
pub use bavg_ws::{StopHandle, StreamError, StreamSession, Topic};
