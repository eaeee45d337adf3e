//! Subscribe handshake

use crate::error::{WsError, WsResult};
use crate::transport::{Transport, TransportError};
use bavg_types::{Command, CommandAck, SubscribeOptions, SymbolSet};
use std::fmt;
use tracing::{debug, instrument, warn};

/// A subscribable unit of a stream
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Global index ticker for one currency
    Ticker {
        currency: String,
        symbol_set: SymbolSet,
    },
    /// Feed for one exchange
    Exchange { exchange: String },
}

impl Topic {
    /// Ticker topic in the global symbol set
    pub fn ticker(currency: impl Into<String>) -> Self {
        Self::ticker_in(currency, SymbolSet::Global)
    }

    /// Ticker topic in a specific symbol set
    pub fn ticker_in(currency: impl Into<String>, symbol_set: SymbolSet) -> Self {
        Self::Ticker {
            currency: currency.into(),
            symbol_set,
        }
    }

    /// Exchange topic
    pub fn exchange(exchange: impl Into<String>) -> Self {
        Self::Exchange {
            exchange: exchange.into(),
        }
    }

    /// Currency or exchange identifier
    pub fn name(&self) -> &str {
        match self {
            Self::Ticker { currency, .. } => currency,
            Self::Exchange { exchange } => exchange,
        }
    }

    /// Options block of the subscribe command
    pub fn options(&self) -> SubscribeOptions {
        match self {
            Self::Ticker {
                currency,
                symbol_set,
            } => SubscribeOptions::Currency {
                currency: currency.clone(),
                symbol_set: *symbol_set,
            },
            Self::Exchange { exchange } => SubscribeOptions::Exchange {
                exchange: exchange.clone(),
            },
        }
    }

    /// Subscribe command for this topic
    pub fn command(&self) -> Command {
        Command::subscribe(self.options())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Subscribe to each topic in order, waiting for every acknowledgement
///
/// Stops at the first failure; topics acknowledged before it are not
/// unsubscribed since the caller is expected to drop the connection. An empty
/// topic list succeeds without touching the transport.
#[instrument(skip_all, fields(topics = topics.len()))]
pub async fn subscribe_all<T>(transport: &mut T, topics: &[Topic]) -> WsResult<()>
where
    T: Transport + ?Sized,
{
    for topic in topics {
        let command = serde_json::to_string(&topic.command()).map_err(|source| WsError::Encode {
            topic: topic.clone(),
            source,
        })?;

        debug!("Subscribing to {}", topic);
        transport
            .send(&command)
            .await
            .map_err(|source| WsError::Protocol {
                topic: topic.clone(),
                source,
            })?;

        let frame = transport
            .recv()
            .await
            .and_then(|frame| frame.ok_or(TransportError::Closed))
            .map_err(|source| WsError::Protocol {
                topic: topic.clone(),
                source,
            })?;

        let ack: CommandAck = serde_json::from_str(&frame).map_err(|source| WsError::Decode {
            context: format!("acknowledgement for {}", topic),
            raw: frame.clone(),
            source,
        })?;

        if !ack.is_ok() {
            warn!("Subscription to {} rejected: {}", topic, ack.data);
            return Err(WsError::SubscriptionRejected {
                topic: topic.clone(),
                got: ack.data,
            });
        }
    }

    Ok(())
}
