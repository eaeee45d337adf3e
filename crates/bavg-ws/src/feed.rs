//! Stream kinds
//!
//! A [`Feed`] fixes everything that differs between the ticker and exchange
//! streams: the socket path, how a topic name becomes a subscribe command, and
//! the payload type data frames decode into.

use crate::subscription::Topic;
use bavg_types::{DataFrame, Exchange, Ticker};
use serde::de::DeserializeOwned;

/// Capability set of a stream kind
pub trait Feed: Send + Sync + 'static {
    /// Payload carried in the `data` field of every data frame
    type Payload: DeserializeOwned + Send + 'static;

    /// Socket path on the streaming host
    const PATH: &'static str;

    /// Topic for a currency or exchange name
    fn topic(name: &str) -> Topic;

    /// Decode one data frame into its payload
    fn decode(frame: &str) -> Result<Self::Payload, serde_json::Error> {
        serde_json::from_str::<DataFrame<Self::Payload>>(frame).map(|frame| frame.data)
    }
}

/// Global index tickers, one topic per currency
#[derive(Debug, Clone, Copy, Default)]
pub struct TickerFeed;

impl Feed for TickerFeed {
    type Payload = Ticker;

    const PATH: &'static str = "websocket/multiple/ticker";

    fn topic(name: &str) -> Topic {
        Topic::ticker(name)
    }
}

/// Per-exchange data, one topic per exchange
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeFeed;

impl Feed for ExchangeFeed {
    type Payload = Exchange;

    const PATH: &'static str = "websocket/multiple/exchanges";

    fn topic(name: &str) -> Topic {
        Topic::exchange(name)
    }
}
