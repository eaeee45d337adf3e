//! Socket sessions
//!
//! Opening a session is all-or-nothing: if the ticket request, the dial or any
//! subscribe acknowledgement fails, the socket is closed and the error is
//! returned. No retries happen here; a caller that wants resilience rebuilds
//! the session from scratch.

use crate::error::{WsError, WsResult};
use crate::feed::{ExchangeFeed, Feed, TickerFeed};
use crate::monitor::{StreamMonitor, StreamSession};
use crate::subscription::{subscribe_all, Topic};
use crate::transport::{Transport, WsTransport};
use bavg_rest::{request_url, TicketBroker};
use bavg_types::{Exchange, Ticker};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Production streaming host
pub const DEFAULT_WS_BASE: &str = "wss://apiv2.bitcoinaverage.com";

/// Buffered payloads per stream before reads are throttled
const DEFAULT_DATA_CAPACITY: usize = 2;

/// Configuration for streaming sessions
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Scheme and host sockets are dialed on
    pub ws_base: String,
    /// Dial timeout
    pub connect_timeout: Duration,
    /// Capacity of the data channel
    pub data_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            ws_base: DEFAULT_WS_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            data_capacity: DEFAULT_DATA_CAPACITY,
        }
    }
}

impl StreamConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the streaming host
    pub fn with_ws_base(mut self, ws_base: impl Into<String>) -> Self {
        self.ws_base = ws_base.into();
        self
    }

    /// Set the dial timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the data channel capacity (at least 1)
    pub fn with_data_capacity(mut self, capacity: usize) -> Self {
        self.data_capacity = capacity;
        self
    }
}

/// Opens authenticated streams
#[derive(Debug, Clone)]
pub struct StreamClient {
    broker: TicketBroker,
    config: StreamConfig,
    ws_base: Url,
}

impl StreamClient {
    /// Create a stream client that obtains tickets from `broker`
    pub fn new(broker: TicketBroker, config: StreamConfig) -> WsResult<Self> {
        let ws_base = Url::parse(&config.ws_base).map_err(|source| WsError::InvalidUrl {
            url: config.ws_base.clone(),
            source,
        })?;

        Ok(Self {
            broker,
            config,
            ws_base,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Stream global index tickers for the given currencies
    pub async fn ticker_stream<I, S>(&self, currencies: I) -> WsResult<StreamSession<Ticker>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stream::<TickerFeed, _, _>(currencies).await
    }

    /// Stream per-exchange data for the given exchanges
    pub async fn exchange_stream<I, S>(&self, exchanges: I) -> WsResult<StreamSession<Exchange>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stream::<ExchangeFeed, _, _>(exchanges).await
    }

    /// Stream a feed for topics named by currency or exchange
    pub async fn stream<F, I, S>(&self, names: I) -> WsResult<StreamSession<F::Payload>>
    where
        F: Feed,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let topics: Vec<Topic> = names.into_iter().map(|n| F::topic(n.as_ref())).collect();
        self.connect::<F>(&topics).await
    }

    /// Open a session for explicit topics
    ///
    /// A fresh ticket is requested for every call.
    #[instrument(skip(self, topics), fields(path = F::PATH, topics = topics.len()))]
    pub async fn connect<F: Feed>(&self, topics: &[Topic]) -> WsResult<StreamSession<F::Payload>> {
        let ticket = self.broker.get_ticket().await?;
        debug!("Got socket ticket");

        let url = request_url(
            &self.ws_base,
            F::PATH,
            &[
                ("ticket", ticket.ticket),
                ("public_key", self.broker.public_key().to_string()),
            ],
        );

        let transport = WsTransport::new(url.as_str()).with_timeout(self.config.connect_timeout);
        open_session::<F, _>(transport, topics, &self.config).await
    }
}

/// Dial `transport`, subscribe to `topics` and hand the socket to a monitor
///
/// The transport must not be connected yet. On any failure it is closed
/// before the error is returned.
pub async fn open_session<F, T>(
    mut transport: T,
    topics: &[Topic],
    config: &StreamConfig,
) -> WsResult<StreamSession<F::Payload>>
where
    F: Feed,
    T: Transport + 'static,
{
    let endpoint = redacted(transport.endpoint());

    transport
        .connect()
        .await
        .map_err(|source| WsError::Connection {
            url: endpoint.clone(),
            source,
        })?;
    debug!("Connected to {}", endpoint);

    if let Err(e) = subscribe_all(&mut transport, topics).await {
        if let Err(close_err) = transport.close().await {
            debug!("Error closing websocket after failed subscribe: {}", close_err);
        }
        return Err(e);
    }

    info!("Subscribed to {} topic(s) on {}", topics.len(), endpoint);
    Ok(StreamMonitor::<F, T>::spawn(transport, config.data_capacity))
}

/// Endpoint without its query string, which carries the ticket
fn redacted(endpoint: &str) -> String {
    endpoint.split('?').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use std::sync::atomic::Ordering;

    const OK: &str = r#"{"event":"message","data":"OK"}"#;

    #[test]
    fn test_stream_config_builder() {
        let config = StreamConfig::new()
            .with_ws_base("ws://127.0.0.1:9000")
            .with_timeout(Duration::from_secs(5))
            .with_data_capacity(16);

        assert_eq!(config.ws_base, "ws://127.0.0.1:9000");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.data_capacity, 16);
        assert_eq!(StreamConfig::default().data_capacity, 2);
    }

    #[test]
    fn test_redacted() {
        assert_eq!(
            redacted("wss://host/websocket/multiple/ticker?ticket=abc&public_key=pk"),
            "wss://host/websocket/multiple/ticker"
        );
        assert_eq!(redacted("wss://host/path"), "wss://host/path");
    }

    #[tokio::test]
    async fn test_rejection_before_monitor_starts() {
        let mut transport = MockTransport::new("wss://mock.test/websocket/multiple/ticker?ticket=t");
        transport.push_responses([OK, r#"{"event":"message","data":"FAIL:unknown"}"#]);
        let closed = transport.close_flag();

        let topics = [Topic::ticker("BTC"), Topic::ticker("LTC")];
        let result =
            open_session::<TickerFeed, _>(transport, &topics, &StreamConfig::default()).await;

        match result {
            Err(WsError::SubscriptionRejected { topic, got }) => {
                assert_eq!(topic.name(), "LTC");
                assert_eq!(got, "FAIL:unknown");
            }
            other => panic!("expected rejection, got {:?}", other.map(|_| ())),
        }
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dial_failure() {
        let mut transport = MockTransport::new("wss://mock.test/path?ticket=secret");
        transport.fail_connect = true;

        let err = open_session::<ExchangeFeed, _>(transport, &[], &StreamConfig::default())
            .await
            .unwrap_err();

        match err {
            WsError::Connection { url, .. } => assert_eq!(url, "wss://mock.test/path"),
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_topics_gives_live_session() {
        let mut transport = MockTransport::new("wss://mock.test");
        transport.push_response(r#"{"event":"message","data":{"name":"bitstamp"}}"#);
        transport.hold_open = true;

        let mut session = open_session::<ExchangeFeed, _>(transport, &[], &StreamConfig::default())
            .await
            .unwrap();

        let exchange = session.data.recv().await.unwrap();
        assert_eq!(exchange.name, "bitstamp");
        session.stop.stop_and_wait().await;
    }

    #[test]
    fn test_invalid_ws_base() {
        let rest = bavg_rest::RestClient::new(
            bavg_rest::Credentials::new("pub", "sec").unwrap(),
        )
        .unwrap();
        let result = StreamClient::new(
            rest.ticket_broker(),
            StreamConfig::new().with_ws_base("::not a url::"),
        );
        assert!(matches!(result, Err(WsError::InvalidUrl { .. })));
    }
}
