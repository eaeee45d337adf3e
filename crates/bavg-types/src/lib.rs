//! Shared types for the BitcoinAverage API
//!
//! This crate provides the record and wire types used across the workspace.
//! It has no networking dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Pair`] - Trading pair symbols (e.g., "BTCUSD")
//! - [`FixedDecimal`] - Numeric field kept as raw JSON text
//! - [`Ticker`], [`Exchange`], [`HistoryData`] - Market data records
//! - [`Command`], [`CommandAck`], [`DataFrame`] - Websocket frames
//! - [`StreamingTicket`] - Websocket authorization ticket

pub mod decimal;
pub mod error;
pub mod exchange;
pub mod history;
pub mod messages;
pub mod pair;
pub mod ticker;

pub use decimal::FixedDecimal;
pub use error::DecimalError;
pub use exchange::{Exchange, ExchangeSymbol};
pub use history::{HistoryData, HistoryResolution};
pub use messages::{
    Command, CommandAck, DataFrame, Operation, StreamingTicket, SubscribeOptions, SymbolSet,
    ACK_OK,
};
pub use pair::Pair;
pub use ticker::{Changes, MultiTicker, Ticker, DWM};

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
