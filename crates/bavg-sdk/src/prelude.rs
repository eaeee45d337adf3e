//! Re-exports for convenience
//!
//! Import everything you need with:
//! ```
//! use bavg_sdk::prelude::*;
//! ```

// Client
pub use crate::builder::BitcoinAverageClientBuilder;
pub use crate::client::BitcoinAverageClient;
pub use crate::error::{ConfigError, SdkError, SdkResult};

// Credentials
pub use bavg_auth::{AuthError, Credentials, SignedToken};

// Types from bavg-types
pub use bavg_types::{
    Changes, Exchange, ExchangeSymbol, FixedDecimal, HistoryData, HistoryResolution,
    MultiTicker, Pair, StreamingTicket, SymbolSet, Ticker, DWM,
};

// REST types
pub use bavg_rest::{ClientConfig, RestClient, RestError};

// Stream types
pub use bavg_ws::{
    ExchangeFeed, Feed, StopHandle, StopReason, StreamClient, StreamConfig, StreamError,
    StreamSession, TickerFeed, Topic, WsError,
};

// Decimal for prices
pub use bavg_types::Decimal;
