//! Authenticated websocket streams for the BitcoinAverage API
//!
//! A stream is opened in three steps: a ticket is requested over the signed
//! REST API, the socket is dialed with that ticket, and one subscribe command
//! is sent per topic, each acknowledged before the next. A background task
//! then owns the socket and fans decoded frames out to a data channel and
//! failures to an error channel until it is told to stop.
//!
//! # Example
//!
//! ```no_run
//! use bavg_rest::{Credentials, RestClient};
//! use bavg_ws::{StreamClient, StreamConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rest = RestClient::new(Credentials::from_env()?)?;
//!     let streams = StreamClient::new(rest.ticket_broker(), StreamConfig::default())?;
//!
//!     let mut session = streams.ticker_stream(["BTCUSD", "ETHUSD"]).await?;
//!
//!     tokio::select! {
//!         Some(ticker) = session.data.recv() => println!("last: {}", ticker.last),
//!         Some(err) = session.errors.recv() => eprintln!("stream error: {}", err),
//!     }
//!
//!     session.stop.stop_and_wait().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod feed;
pub mod monitor;
pub mod session;
pub mod subscription;
pub mod transport;

// Re-export main types
pub use error::{StreamError, WsError, WsResult};
pub use feed::{ExchangeFeed, Feed, TickerFeed};
pub use monitor::{MonitorState, StopHandle, StopReason, StreamSession};
pub use session::{open_session, StreamClient, StreamConfig, DEFAULT_WS_BASE};
pub use subscription::{subscribe_all, Topic};
pub use transport::{Transport, TransportError, WsTransport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;
