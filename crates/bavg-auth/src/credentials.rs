//! API credentials
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretBox};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};
use crate::token::{sign, SignedToken};

/// Environment variable holding the public key
pub const PUBLIC_KEY_VAR: &str = "BTC_AVERAGE_PUBLIC_KEY";
/// Environment variable holding the secret key
pub const SECRET_KEY_VAR: &str = "BTC_AVERAGE_SECRET_KEY";

/// Public/secret key pair for authenticated requests
pub struct Credentials {
    public_key: String,
    secret_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials
    ///
    /// Both keys must be non-empty.
    pub fn new(public_key: impl Into<String>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let public_key = public_key.into();
        let secret_key = secret_key.as_ref();

        if public_key.is_empty() {
            return Err(AuthError::InvalidCredentials("public key is empty".into()));
        }
        if secret_key.is_empty() {
            return Err(AuthError::InvalidCredentials("secret key is empty".into()));
        }

        Ok(Self {
            public_key,
            secret_key: SecretBox::new(Box::new(secret_key.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BTC_AVERAGE_PUBLIC_KEY` and `BTC_AVERAGE_SECRET_KEY`.
    pub fn from_env() -> AuthResult<Self> {
        let public_key = std::env::var(PUBLIC_KEY_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(PUBLIC_KEY_VAR.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_VAR.to_string()))?;

        Self::new(public_key, secret_key)
    }

    /// Get the public key
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign for an explicit unix timestamp (seconds)
    pub fn sign_at(&self, timestamp: u64) -> SignedToken {
        sign(self.secret_key.expose_secret(), &self.public_key, timestamp)
    }

    /// Sign for the current wall-clock second
    pub fn sign_now(&self) -> SignedToken {
        self.sign_at(unix_now())
    }

    /// Check a token against this secret
    pub fn verify(&self, token: &SignedToken) -> AuthResult<()> {
        token.verify(self.secret_key.expose_secret())
    }
}

fn unix_now() -> u64 {
    // A clock before 1970 signs as 0; the server rejects it as stale.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key.clone(),
            secret_key: SecretBox::new(Box::new(self.secret_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
