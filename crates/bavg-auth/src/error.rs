//! Error types for authentication operations

/// Errors that can occur while building credentials or checking signatures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Token text is not `{timestamp}.{public_key}.{digest}`
    #[error("Malformed signature token: {0}")]
    MalformedToken(String),

    /// Digest does not match the secret
    #[error("Signature mismatch")]
    SignatureMismatch,
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
