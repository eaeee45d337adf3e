//! High-level BitcoinAverage client

use crate::builder::BitcoinAverageClientBuilder;
use crate::error::SdkResult;
use bavg_rest::{Credentials, RestClient};
use bavg_types::{Exchange, HistoryData, HistoryResolution, MultiTicker, Pair, Ticker};
use bavg_ws::{StreamClient, StreamSession, Topic, TickerFeed};
use chrono::{DateTime, Utc};
use tracing::instrument;

/// High-level client for the BitcoinAverage API
///
/// Bundles the signed REST client with the stream client that draws its
/// tickets from it. Cheap to clone.
///
/// # Example
///
/// ```no_run
/// use bavg_sdk::BitcoinAverageClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BitcoinAverageClient::from_env()?;
///
///     let tickers = client.tickers(&["BTC"], &["USD"]).await?;
///     println!("{} tickers", tickers.len());
///
///     let mut session = client.ticker_stream(["BTCUSD"]).await?;
///     if let Some(ticker) = session.data.recv().await {
///         println!("BTCUSD last = {}", ticker.last);
///     }
///     session.stop.stop_and_wait().await;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BitcoinAverageClient {
    rest: RestClient,
    streams: StreamClient,
}

impl BitcoinAverageClient {
    /// Create a new client builder
    pub fn builder(credentials: Credentials) -> BitcoinAverageClientBuilder {
        BitcoinAverageClientBuilder::new(credentials)
    }

    /// Create a client with default settings
    pub fn new(credentials: Credentials) -> SdkResult<Self> {
        Self::builder(credentials).build()
    }

    /// Create a client from `BTC_AVERAGE_PUBLIC_KEY` and `BTC_AVERAGE_SECRET_KEY`
    pub fn from_env() -> SdkResult<Self> {
        Self::new(Credentials::from_env()?)
    }

    pub(crate) fn from_parts(rest: RestClient, streams: StreamClient) -> Self {
        Self { rest, streams }
    }

    /// Underlying REST client
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Underlying stream client
    pub fn streams(&self) -> &StreamClient {
        &self.streams
    }

    // ========================================================================
    // REST
    // ========================================================================

    /// Global index tickers; empty slices mean "all"
    pub async fn tickers(&self, cryptos: &[&str], fiats: &[&str]) -> SdkResult<MultiTicker> {
        Ok(self.rest.tickers(cryptos, fiats).await?)
    }

    /// Global index ticker for one pair
    ///
    /// Returns `None` if the pair is not six letters long or the API has no
    /// ticker for it.
    pub async fn ticker(&self, pair: &Pair) -> SdkResult<Option<Ticker>> {
        let (Some(base), Some(counter)) = (pair.base(), pair.counter()) else {
            return Ok(None);
        };

        let mut tickers = self.rest.tickers(&[base], &[counter]).await?;
        Ok(tickers.remove(pair))
    }

    /// Per-exchange data; empty slices mean "all"
    pub async fn exchanges(&self, cryptos: &[&str], fiats: &[&str]) -> SdkResult<Vec<Exchange>> {
        Ok(self.rest.exchanges(cryptos, fiats).await?)
    }

    /// Global index price of `pair` at a point in time
    pub async fn price_at_timestamp(
        &self,
        pair: &Pair,
        at: DateTime<Utc>,
        resolution: HistoryResolution,
    ) -> SdkResult<HistoryData> {
        Ok(self.rest.price_at_timestamp(pair, at, resolution).await?)
    }

    // ========================================================================
    // Streams
    // ========================================================================

    /// Stream global index tickers for the given currencies
    #[instrument(skip_all)]
    pub async fn ticker_stream<I, S>(&self, currencies: I) -> SdkResult<StreamSession<Ticker>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.streams.ticker_stream(currencies).await?)
    }

    /// Stream global index tickers for explicit topics
    ///
    /// Use this to pick a symbol set other than the global one.
    pub async fn ticker_stream_for(&self, topics: &[Topic]) -> SdkResult<StreamSession<Ticker>> {
        Ok(self.streams.connect::<TickerFeed>(topics).await?)
    }

    /// Stream per-exchange data for the given exchanges
    #[instrument(skip_all)]
    pub async fn exchange_stream<I, S>(&self, exchanges: I) -> SdkResult<StreamSession<Exchange>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.streams.exchange_stream(exchanges).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use bavg_types::SymbolSet;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BitcoinAverageClient {
        BitcoinAverageClient::builder(Credentials::new("pub", "sec").unwrap())
            .with_api_base(server.uri())
            .with_ws_base("ws://127.0.0.1:9")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_ticker_for_pair() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indices/global/ticker/all"))
            .and(query_param("crypto", "BTC"))
            .and(query_param("fiat", "USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"BTCUSD":{"last":6561.19,"bid":"6560.5"}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ticker = client.ticker(&Pair::new(Pair::BTC_USD)).await.unwrap().unwrap();
        assert_eq!(ticker.last.raw(), Some("6561.19"));

        // Unmatched requests get a 404 from wiremock
        let missing = client.ticker(&Pair::new(Pair::BTC_CNY)).await;
        assert!(matches!(missing, Err(SdkError::Rest(_))));

        assert!(client.ticker(&Pair::new("BTC")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stream_errors_are_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/websocket/get_ticket"))
            .respond_with(ResponseTemplate::new(503).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .ticker_stream_for(&[Topic::ticker_in("BTCUSD", SymbolSet::Local)])
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Stream(_)));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("rate limited"));
    }
}
