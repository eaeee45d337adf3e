//! Signed request executor

use crate::endpoints::MarketEndpoints;
use crate::error::{RestError, RestResult};
use crate::ticket::TicketBroker;
use bavg_auth::Credentials;
use bavg_types::{Exchange, HistoryData, HistoryResolution, MultiTicker, Pair};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Production REST host
pub const DEFAULT_API_BASE: &str = "https://apiv2.bitcoinaverage.com";

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "X-signature";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build `{base}{path}?{query}` with `path` normalized to start with `/`
///
/// The query string is omitted when `query` is empty. Values are
/// form-urlencoded.
pub fn request_url(base: &Url, path: &str, query: &[(&str, String)]) -> Url {
    let mut url = base.clone();

    let prefix = base.path().trim_end_matches('/');
    if path.starts_with('/') {
        url.set_path(&format!("{}{}", prefix, path));
    } else {
        url.set_path(&format!("{}/{}", prefix, path));
    }

    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }

    url
}

/// BitcoinAverage REST API client
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use bavg_rest::{RestClient, Credentials};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RestClient::new(Credentials::new("public", "secret")?)?;
/// let exchanges = client.exchanges(&["BTC"], &[]).await?;
/// println!("{} exchanges", exchanges.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: Client,
    credentials: Credentials,
    api_base: Url,
}

impl RestClient {
    /// Create a client against the production host
    pub fn new(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        let api_base = Url::parse(&config.api_base).map_err(|source| RestError::InvalidUrl {
            url: config.api_base.clone(),
            source,
        })?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_deref().unwrap_or("bavg-rest/0.1.0"))
            .build()
            .map_err(|e| RestError::Configuration(e.to_string()))?;

        info!("Created BitcoinAverage REST client for {}", api_base);

        Ok(Self {
            http_client,
            credentials,
            api_base,
        })
    }

    /// Credentials used to sign requests
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL requests are sent to
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Absolute URL for `path` and `query` on the API host
    pub fn build_url(&self, path: &str, query: &[(&str, String)]) -> Url {
        request_url(&self.api_base, path, query)
    }

    /// Issue a signed GET request
    ///
    /// The signature is computed right before the request is sent, so every
    /// call carries its own fresh token. Responses with a status of 400 or
    /// above are turned into [`RestError::Remote`] with the body read in full.
    /// On success the response is returned undrained; dropping it releases
    /// the connection.
    #[instrument(skip(self, query))]
    pub async fn execute(&self, path: &str, query: &[(&str, String)]) -> RestResult<Response> {
        let url = self.build_url(path, query);
        debug!("GET {}", url.path());

        let response = self
            .http_client
            .get(url)
            .header(SIGNATURE_HEADER, self.credentials.sign_now().to_string())
            .send()
            .await
            .map_err(|source| RestError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.map_err(|source| RestError::Transport {
                path: path.to_string(),
                source,
            })?;

            warn!("{} returned {}", path, status);

            return Err(RestError::Remote {
                path: path.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        Ok(response)
    }

    /// Issue a signed GET request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        let response = self.execute(path, query).await?;

        let body = response.bytes().await.map_err(|source| RestError::Transport {
            path: path.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| RestError::Decode {
            path: path.to_string(),
            source,
        })
    }

    // ========================================================================
    // Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Global index tickers for the given cryptos and fiats
    ///
    /// Empty slices mean "all".
    pub async fn tickers(&self, cryptos: &[&str], fiats: &[&str]) -> RestResult<MultiTicker> {
        self.market().tickers(cryptos, fiats).await
    }

    /// Per-exchange data for the given cryptos and fiats
    pub async fn exchanges(&self, cryptos: &[&str], fiats: &[&str]) -> RestResult<Vec<Exchange>> {
        self.market().exchanges(cryptos, fiats).await
    }

    /// Global index price of `pair` at a point in time
    pub async fn price_at_timestamp(
        &self,
        pair: &Pair,
        at: DateTime<Utc>,
        resolution: HistoryResolution,
    ) -> RestResult<HistoryData> {
        self.market().price_at_timestamp(pair, at, resolution).await
    }

    // ========================================================================
    // Websocket Tickets
    // ========================================================================

    /// Ticket broker sharing this client
    pub fn ticket_broker(&self) -> TicketBroker {
        TicketBroker::new(self.clone())
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("api_base", &self.api_base.as_str())
            .field("public_key", &self.credentials.public_key())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host requests are sent to
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
