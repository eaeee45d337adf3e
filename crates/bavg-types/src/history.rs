//! Historical index prices

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::FixedDecimal;

/// Index price at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryData {
    pub average: FixedDecimal,
    pub time: String,
}

/// Granularity of a historical lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryResolution {
    #[default]
    Minute,
    Hour,
    Day,
}

impl HistoryResolution {
    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for HistoryResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
