//! Trading pair symbols (BTCUSD format)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading pair symbol: base currency code followed by counter currency code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pair(String);

impl Pair {
    /// Price of 1 BTC in USD
    pub const BTC_USD: &'static str = "BTCUSD";
    /// Price of 1 BTC in CNY
    pub const BTC_CNY: &'static str = "BTCCNY";

    /// Create a new pair from a string
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the pair as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base currency (e.g., "BTC" from "BTCUSD")
    pub fn base(&self) -> Option<&str> {
        self.0.get(0..3)
    }

    /// Counter currency (e.g., "USD" from "BTCUSD")
    pub fn counter(&self) -> Option<&str> {
        self.0.get(3..6)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Pair {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Pair {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Pair {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parts() {
        let pair = Pair::new(Pair::BTC_USD);
        assert_eq!(pair.base(), Some("BTC"));
        assert_eq!(pair.counter(), Some("USD"));
    }

    #[test]
    fn test_short_pair() {
        assert_eq!(Pair::new("BT").base(), None);
        assert_eq!(Pair::new("BTCUS").base(), Some("BTC"));
        assert_eq!(Pair::new("BTCUS").counter(), None);
    }

    #[test]
    fn test_pair_serde() {
        let pair = Pair::new("ETHEUR");
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"ETHEUR\"");

        let parsed: Pair = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pair);
    }
}
