//! Websocket frame types for the BitcoinAverage streaming API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Acknowledgement payload for an accepted command
pub const ACK_OK: &str = "OK";

// ============================================================================
// Request Types
// ============================================================================

/// Command frame sent to the socket
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    /// Always "message"
    pub event: &'static str,
    /// Operation to perform
    pub data: Operation,
}

impl Command {
    /// Create a subscribe command
    pub fn subscribe(options: SubscribeOptions) -> Self {
        Self {
            event: "message",
            data: Operation {
                operation: "subscribe",
                options,
            },
        }
    }
}

/// The operation carried by a [`Command`]
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    /// Operation name, e.g. "subscribe"
    pub operation: &'static str,
    /// Topic the operation applies to
    pub options: SubscribeOptions,
}

/// Topic-specific subscribe options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubscribeOptions {
    /// Global index ticker for one currency
    Currency {
        currency: String,
        symbol_set: SymbolSet,
    },
    /// Feed for one exchange
    Exchange { exchange: String },
}

/// Symbol set a ticker subscription is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolSet {
    #[default]
    Global,
    Local,
    Crypto,
    Tokens,
}

impl SymbolSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
            Self::Crypto => "crypto",
            Self::Tokens => "tokens",
        }
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Reply to a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandAck {
    /// Echoes the command's event name
    pub event: String,
    /// "OK" or an error description
    pub data: String,
}

impl CommandAck {
    /// Whether the command was accepted
    pub fn is_ok(&self) -> bool {
        self.data == ACK_OK
    }
}

/// Data frame pushed by the socket
#[derive(Debug, Clone, Deserialize)]
pub struct DataFrame<T> {
    /// Event name, "message" for payload frames
    pub event: String,
    /// Decoded payload
    pub data: T,
}

/// Ticket used to authorize a websocket connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamingTicket {
    /// Single-use value passed as the `ticket` query parameter
    pub ticket: String,
}
