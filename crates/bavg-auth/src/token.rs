//! Signature tokens
//!
//! A token is bound to the second it was produced in. It is computed fresh for
//! every request and never cached.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Sign `"{timestamp}.{public_key}"` with the secret key
///
/// Pure function of its inputs: the same timestamp always yields the same token.
pub fn sign(secret: &[u8], public_key: &str, timestamp: u64) -> SignedToken {
    let payload = format!("{}.{}", timestamp, public_key);
    let digest = hex::encode(mac(secret, &payload).finalize().into_bytes());

    SignedToken {
        timestamp,
        public_key: public_key.to_string(),
        digest,
    }
}

fn mac(secret: &[u8], payload: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac
}

/// Value of the `X-signature` request header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    timestamp: u64,
    public_key: String,
    digest: String,
}

impl SignedToken {
    /// Unix seconds the token was produced for
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Public key the token was issued for
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Hex-encoded HMAC-SHA256 digest
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The signed text, `"{timestamp}.{public_key}"`
    pub fn payload(&self) -> String {
        format!("{}.{}", self.timestamp, self.public_key)
    }

    /// Recompute the digest with `secret` and compare in constant time
    pub fn verify(&self, secret: &[u8]) -> AuthResult<()> {
        let expected = hex::decode(&self.digest)
            .map_err(|e| AuthError::MalformedToken(format!("digest is not hex: {}", e)))?;

        mac(secret, &self.payload())
            .verify_slice(&expected)
            .map_err(|_| AuthError::SignatureMismatch)
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.timestamp, self.public_key, self.digest)
    }
}

impl FromStr for SignedToken {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Public keys may themselves contain dots; the timestamp is the first
        // segment and the digest the last.
        let (timestamp, rest) = s
            .split_once('.')
            .ok_or_else(|| AuthError::MalformedToken(s.to_string()))?;
        let (public_key, digest) = rest
            .rsplit_once('.')
            .ok_or_else(|| AuthError::MalformedToken(s.to_string()))?;
        let timestamp = timestamp
            .parse()
            .map_err(|_| AuthError::MalformedToken(s.to_string()))?;

        Ok(Self {
            timestamp,
            public_key: public_key.to_string(),
            digest: digest.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key";
    const PUBLIC: &str = "test_public_key";

    #[test]
    fn test_token_format() {
        let token = sign(SECRET, PUBLIC, 1_530_023_612);
        let text = token.to_string();

        assert!(text.starts_with("1530023612.test_public_key."));
        // SHA-256 digest is 32 bytes, 64 hex chars
        assert_eq!(token.digest().len(), 64);
        assert!(token.digest().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_deterministic_for_same_timestamp() {
        assert_eq!(sign(SECRET, PUBLIC, 100), sign(SECRET, PUBLIC, 100));
    }

    #[test]
    fn test_different_timestamps_differ() {
        let t1 = sign(SECRET, PUBLIC, 100);
        let t2 = sign(SECRET, PUBLIC, 101);

        assert_ne!(t1.to_string(), t2.to_string());
        assert_ne!(t1.digest(), t2.digest());
        assert!(t1.verify(SECRET).is_ok());
        assert!(t2.verify(SECRET).is_ok());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = sign(SECRET, PUBLIC, 100);
        assert!(matches!(
            token.verify(b"another_secret"),
            Err(AuthError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_parse_round_trip_verifies() {
        let text = sign(SECRET, "key.with.dots", 42).to_string();
        let parsed: SignedToken = text.parse().unwrap();

        assert_eq!(parsed.timestamp(), 42);
        assert_eq!(parsed.public_key(), "key.with.dots");
        assert!(parsed.verify(SECRET).is_ok());
    }

    #[test]
    fn test_parse_malformed() {
        assert!("no-dots".parse::<SignedToken>().is_err());
        assert!("abc.key.digest".parse::<SignedToken>().is_err());
    }

    #[test]
    fn test_tampered_digest() {
        let token = SignedToken {
            timestamp: 1,
            public_key: PUBLIC.to_string(),
            digest: "zz".to_string(),
        };
        assert!(matches!(
            token.verify(SECRET),
            Err(AuthError::MalformedToken(_))
        ));
    }
}
