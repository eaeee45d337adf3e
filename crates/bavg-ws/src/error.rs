//! Error types for websocket streams

use crate::subscription::Topic;
use crate::transport::TransportError;
use bavg_rest::RestError;
use thiserror::Error;

/// Errors that abort opening a stream
#[derive(Error, Debug)]
pub enum WsError {
    /// Ticket could not be obtained
    #[error("requesting websocket ticket: {0}")]
    Ticket(#[from] RestError),

    /// Stream URL could not be built
    #[error("invalid websocket URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Socket dial failed
    #[error("dialing socket to {url}: {source}")]
    Connection {
        /// Endpoint without its query string
        url: String,
        #[source]
        source: TransportError,
    },

    /// Send or receive failed during the subscribe handshake
    #[error("subscribing to {topic}: {source}")]
    Protocol {
        topic: Topic,
        #[source]
        source: TransportError,
    },

    /// Acknowledgement was not "OK"
    #[error("subscription to {topic} rejected: {got}")]
    SubscriptionRejected { topic: Topic, got: String },

    /// Frame did not match the expected JSON shape
    #[error("decoding {context}: {source}")]
    Decode {
        context: String,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Command could not be serialized
    #[error("encoding subscribe command for {topic}: {source}")]
    Encode {
        topic: Topic,
        #[source]
        source: serde_json::Error,
    },
}

impl WsError {
    /// Returns true if rebuilding the stream from scratch may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Ticket(e) => e.is_retryable(),
            Self::Connection { .. } | Self::Protocol { .. } => true,
            Self::InvalidUrl { .. }
            | Self::SubscriptionRejected { .. }
            | Self::Decode { .. }
            | Self::Encode { .. } => false,
        }
    }
}

/// Result type for opening streams
pub type WsResult<T> = Result<T, WsError>;

/// Per-frame failures reported on a live stream's error channel
#[derive(Error, Debug)]
pub enum StreamError {
    /// Frame did not match the payload shape
    #[error("reading JSON: {source}")]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the next frame failed
    #[error("reading frame: {0}")]
    Transport(#[from] TransportError),

    /// Peer closed the connection; the stream ends after this error
    #[error("connection closed by peer")]
    Disconnected,
}

impl StreamError {
    /// Whether the session ends after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}
