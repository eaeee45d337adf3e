//! Client Builder Pattern
//!
//! Provides a fluent builder API for configuring the BitcoinAverage client
//! with sensible defaults and validation.
//!
//! # Example
//!
//! ```
//! use bavg_sdk::builder::BitcoinAverageClientBuilder;
//! use bavg_sdk::Credentials;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = BitcoinAverageClientBuilder::new(Credentials::new("public", "secret")?)
//!     .with_timeout(Duration::from_secs(15))
//!     .with_data_capacity(64);
//! assert!(builder.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use crate::client::BitcoinAverageClient;
use crate::error::{ConfigError, SdkResult};
use bavg_rest::{ClientConfig, Credentials, RestClient, DEFAULT_API_BASE};
use bavg_ws::{StreamClient, StreamConfig, DEFAULT_WS_BASE};
use std::time::Duration;
use tracing::{info, instrument};

/// Builder for configuring a BitcoinAverage client
///
/// Covers both halves of the client:
/// - REST settings (API host, request timeout, user agent)
/// - Streaming settings (socket host, dial timeout, data channel capacity)
#[derive(Debug, Clone)]
pub struct BitcoinAverageClientBuilder {
    /// Key pair every request is signed with
    pub credentials: Credentials,

    /// REST API host
    pub api_base: String,

    /// Streaming host
    pub ws_base: String,

    /// REST request timeout
    pub timeout: Duration,

    /// Socket dial timeout
    pub connect_timeout: Duration,

    /// Payloads buffered per stream
    pub data_capacity: usize,

    /// Custom user agent
    pub user_agent: Option<String>,
}

impl BitcoinAverageClientBuilder {
    /// Create a new builder with default settings
    pub fn new(credentials: Credentials) -> Self {
        let rest = ClientConfig::default();
        let stream = StreamConfig::default();

        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            ws_base: DEFAULT_WS_BASE.to_string(),
            timeout: rest.timeout,
            connect_timeout: stream.connect_timeout,
            data_capacity: stream.data_capacity,
            user_agent: None,
        }
    }

    /// Set the REST API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the streaming host
    pub fn with_ws_base(mut self, ws_base: impl Into<String>) -> Self {
        self.ws_base = ws_base.into();
        self
    }

    /// Set the REST request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the socket dial timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set how many payloads a stream buffers before throttling reads
    pub fn with_data_capacity(mut self, capacity: usize) -> Self {
        self.data_capacity = capacity;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl { field: "api" });
        }
        if self.ws_base.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl { field: "ws" });
        }

        if self.timeout < Duration::from_secs(1) {
            return Err(ConfigError::TimeoutTooShort { field: "request" });
        }
        if self.connect_timeout < Duration::from_secs(1) {
            return Err(ConfigError::TimeoutTooShort { field: "connect" });
        }

        if self.data_capacity == 0 {
            return Err(ConfigError::ZeroDataCapacity);
        }

        Ok(())
    }

    /// Convert to REST client config
    pub fn to_client_config(&self) -> ClientConfig {
        let config = ClientConfig::new()
            .with_api_base(self.api_base.clone())
            .with_timeout(self.timeout);

        match &self.user_agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }

    /// Convert to stream config
    pub fn to_stream_config(&self) -> StreamConfig {
        StreamConfig::new()
            .with_ws_base(self.ws_base.clone())
            .with_timeout(self.connect_timeout)
            .with_data_capacity(self.data_capacity)
    }

    /// Validate and build the client
    ///
    /// No network calls are made here.
    #[instrument(skip(self), fields(api = %self.api_base, ws = %self.ws_base))]
    pub fn build(self) -> SdkResult<BitcoinAverageClient> {
        self.validate()?;

        let rest = RestClient::with_config(self.credentials.clone(), self.to_client_config())?;
        let streams = StreamClient::new(rest.ticket_broker(), self.to_stream_config())?;

        info!("BitcoinAverage client created");
        Ok(BitcoinAverageClient::from_parts(rest, streams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    fn creds() -> Credentials {
        Credentials::new("pub", "sec").unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let builder = BitcoinAverageClientBuilder::new(creds());

        assert_eq!(builder.api_base, DEFAULT_API_BASE);
        assert_eq!(builder.ws_base, DEFAULT_WS_BASE);
        assert_eq!(builder.data_capacity, 2);
        assert_eq!(builder.connect_timeout, Duration::from_secs(10));
        assert!(builder.user_agent.is_none());
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_builder_fluent_api() {
        let builder = BitcoinAverageClientBuilder::new(creds())
            .with_api_base("http://127.0.0.1:8080")
            .with_ws_base("ws://127.0.0.1:8081")
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(3))
            .with_data_capacity(32)
            .with_user_agent("bavg-test/1.0");

        let rest = builder.to_client_config();
        assert_eq!(rest.api_base, "http://127.0.0.1:8080");
        assert_eq!(rest.timeout, Duration::from_secs(5));
        assert_eq!(rest.user_agent.as_deref(), Some("bavg-test/1.0"));

        let stream = builder.to_stream_config();
        assert_eq!(stream.ws_base, "ws://127.0.0.1:8081");
        assert_eq!(stream.connect_timeout, Duration::from_secs(3));
        assert_eq!(stream.data_capacity, 32);
    }

    #[test]
    fn test_validation_errors() {
        let err = BitcoinAverageClientBuilder::new(creds())
            .with_timeout(Duration::from_millis(100))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::TimeoutTooShort { field: "request" }));

        let err = BitcoinAverageClientBuilder::new(creds())
            .with_connect_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::TimeoutTooShort { field: "connect" }));

        let err = BitcoinAverageClientBuilder::new(creds())
            .with_data_capacity(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDataCapacity));

        let err = BitcoinAverageClientBuilder::new(creds())
            .with_ws_base(" ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBaseUrl { field: "ws" }));
    }

    #[test]
    fn test_build_rejects_bad_urls() {
        let result = BitcoinAverageClientBuilder::new(creds())
            .with_ws_base("not a url")
            .build();
        assert!(matches!(result, Err(SdkError::Stream(_))));

        let result = BitcoinAverageClientBuilder::new(creds())
            .with_api_base("not a url")
            .build();
        assert!(matches!(result, Err(SdkError::Rest(_))));
    }

    #[test]
    fn test_build() {
        let client = BitcoinAverageClientBuilder::new(creds())
            .with_api_base("http://127.0.0.1:8080")
            .build()
            .unwrap();
        assert_eq!(client.rest().api_base().as_str(), "http://127.0.0.1:8080/");
    }
}
