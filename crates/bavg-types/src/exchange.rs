//! Per-exchange market records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::decimal::FixedDecimal;
use crate::pair::Pair;

/// Full data for a single exchange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exchange {
    pub name: String,
    pub display_name: String,
    pub url: String,
    /// Unix seconds
    pub timestamp: i64,
    pub data_source: String,
    pub symbols: HashMap<Pair, ExchangeSymbol>,
    pub success: bool,
}

impl Exchange {
    /// Look up a pair quoted on this exchange
    pub fn symbol(&self, pair: &str) -> Option<&ExchangeSymbol> {
        self.symbols.get(&Pair::new(pair))
    }
}

/// Data for one pair quoted on an exchange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSymbol {
    pub last: FixedDecimal,
    pub volume: FixedDecimal,
    pub ask: FixedDecimal,
    pub bid: FixedDecimal,
    pub high: FixedDecimal,
    pub low: FixedDecimal,
    pub open: FixedDecimal,
    pub vwap: FixedDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_exchange_decode() {
        let json = r#"{
            "name": "bitstamp",
            "display_name": "Bitstamp",
            "url": "https://www.bitstamp.net",
            "timestamp": 1530023612,
            "data_source": "api",
            "symbols": {
                "BTCUSD": {"last": 6570.0, "volume": 8105.2, "ask": 6571.0, "bid": 6569.5,
                           "high": 6610.0, "low": 6520.0, "open": null, "vwap": 6561.3}
            },
            "success": true
        }"#;

        let exchange: Exchange = serde_json::from_str(json).unwrap();
        assert_eq!(exchange.display_name, "Bitstamp");

        let btc = exchange.symbol("BTCUSD").unwrap();
        assert_eq!(btc.bid.value(), Decimal::new(65695, 1));
        assert!(btc.open.parse().is_err());
        assert!(exchange.symbol("LTCUSD").is_none());
    }
}
