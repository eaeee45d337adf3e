//! Error types for REST API operations

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Network, DNS or TLS failure before a response was available
    #[error("request for {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a status code >= 400
    #[error("[{status}] {status_text} from BitcoinAverage API for {path}: {body}")]
    Remote {
        path: String,
        status: u16,
        status_text: String,
        /// Response body, verbatim
        body: String,
    },

    /// Response body did not match the expected JSON shape
    #[error("decoding JSON from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request URL could not be built
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RestError {
    /// HTTP status of a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if retrying the same request may succeed
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Remote { status, .. } => *status == 429 || *status >= 500,
            Self::Decode { .. } | Self::InvalidUrl { .. } | Self::Configuration(_) => false,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Remote { status: 429, .. })
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
