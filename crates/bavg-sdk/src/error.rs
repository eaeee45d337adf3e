//! SDK error type

use bavg_auth::AuthError;
use bavg_rest::RestError;
use bavg_ws::WsError;
use thiserror::Error;

/// Builder validation errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Timeout below the one second floor
    #[error("{field} timeout must be at least 1 second")]
    TimeoutTooShort { field: &'static str },

    /// Streams need room for at least one payload
    #[error("data channel capacity must be at least 1")]
    ZeroDataCapacity,

    /// Base URL is empty
    #[error("{field} base URL must not be empty")]
    EmptyBaseUrl { field: &'static str },
}

/// Any error surfaced by the SDK
#[derive(Debug, Error)]
pub enum SdkError {
    /// Credentials could not be built
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Builder settings are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// REST call failed
    #[error(transparent)]
    Rest(#[from] RestError),

    /// Stream could not be opened
    #[error(transparent)]
    Stream(#[from] WsError),
}

impl SdkError {
    /// Returns true if repeating the operation may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rest(e) => e.is_retryable(),
            Self::Stream(e) => e.is_retryable(),
            Self::Auth(_) | Self::Config(_) => false,
        }
    }
}

/// Result type for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;
