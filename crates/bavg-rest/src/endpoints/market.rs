//! Market data endpoints

use crate::client::RestClient;
use crate::error::RestResult;
use bavg_types::{Exchange, HistoryData, HistoryResolution, MultiTicker, Pair};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

const TICKERS_PATH: &str = "/indices/global/ticker/all";
const EXCHANGES_PATH: &str = "/exchanges/ticker/all";
const HISTORY_PATH: &str = "/indices/global/history";

/// Market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Get global index tickers
    ///
    /// # Arguments
    /// * `cryptos` - Crypto currencies (e.g., ["BTC", "LTC"]); empty for all
    /// * `fiats` - Fiat currencies (e.g., ["USD", "GBP"]); empty for all
    #[instrument(skip(self))]
    pub async fn tickers(&self, cryptos: &[&str], fiats: &[&str]) -> RestResult<MultiTicker> {
        debug!("Fetching global tickers");
        self.client
            .get_json(TICKERS_PATH, &filter_params(cryptos, fiats))
            .await
    }

    /// Get ticker data from every exchange
    #[instrument(skip(self))]
    pub async fn exchanges(&self, cryptos: &[&str], fiats: &[&str]) -> RestResult<Vec<Exchange>> {
        debug!("Fetching exchange tickers");
        self.client
            .get_json(EXCHANGES_PATH, &filter_params(cryptos, fiats))
            .await
    }

    /// Get the global index price of a pair at a point in time
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "BTCUSD")
    /// * `at` - Instant to look up, sent with second precision
    /// * `resolution` - Granularity of the stored history to read from
    #[instrument(skip(self))]
    pub async fn price_at_timestamp(
        &self,
        pair: &Pair,
        at: DateTime<Utc>,
        resolution: HistoryResolution,
    ) -> RestResult<HistoryData> {
        let path = format!("{}/{}", HISTORY_PATH, pair);
        let query = [
            ("at", at.timestamp().to_string()),
            ("resolution", resolution.as_str().to_string()),
        ];

        debug!("Fetching {} price at {}", pair, at);
        self.client.get_json(&path, &query).await
    }
}

/// `crypto` and `fiat` filters as comma-joined lists, omitted when empty
fn filter_params(cryptos: &[&str], fiats: &[&str]) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2);
    if !cryptos.is_empty() {
        params.push(("crypto", cryptos.join(",")));
    }
    if !fiats.is_empty() {
        params.push(("fiat", fiats.join(",")));
    }
    params
}
