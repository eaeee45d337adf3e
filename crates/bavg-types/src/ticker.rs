//! Global index ticker records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::decimal::FixedDecimal;
use crate::pair::Pair;

/// Ticker snapshots keyed by pair, as returned by the ticker endpoint
pub type MultiTicker = HashMap<Pair, Ticker>;

/// Full data for a single ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticker {
    pub ask: FixedDecimal,
    pub bid: FixedDecimal,
    pub last: FixedDecimal,
    pub high: FixedDecimal,
    pub low: FixedDecimal,
    /// Opening prices for the day, week and month
    pub open: Option<DWM>,
    /// Average prices for the day, week and month
    pub averages: Option<DWM>,
    pub changes: Option<Changes>,
    pub volume: FixedDecimal,
    pub volume_percent: FixedDecimal,
    /// Unix seconds
    pub timestamp: i64,
    pub display_timestamp: String,
    pub success: bool,
    pub time: String,
}

impl Ticker {
    /// Spread between ask and bid (lenient)
    pub fn spread(&self) -> rust_decimal::Decimal {
        self.ask.value() - self.bid.value()
    }
}

/// Values for the "day", "week" and "month" windows
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DWM {
    pub day: FixedDecimal,
    pub week: FixedDecimal,
    pub month: FixedDecimal,
}

/// Percent and price changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Changes {
    pub percent: Option<DWM>,
    pub price: Option<DWM>,
}
