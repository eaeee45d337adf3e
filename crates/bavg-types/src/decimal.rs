//! Fixed-precision numeric fields
//!
//! BitcoinAverage sends prices sometimes as JSON numbers, sometimes as
//! strings, and occasionally as `null`. [`FixedDecimal`] keeps the raw text so
//! callers can choose between a lenient read that falls back to zero and a
//! strict read that reports the parse error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;
use std::str::FromStr;

use crate::error::DecimalError;

/// A numeric field decoded from raw JSON text
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FixedDecimal {
    raw: Option<String>,
}

impl FixedDecimal {
    /// Create from raw text
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    /// An absent value (JSON `null`)
    pub fn empty() -> Self {
        Self { raw: None }
    }

    /// The raw text as received, if any
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Strict read: the parsed value, or why it could not be parsed
    pub fn parse(&self) -> Result<Decimal, DecimalError> {
        let raw = self.raw.as_deref().ok_or(DecimalError::Empty)?;
        let text = raw.trim();

        Decimal::from_str(text)
            .or_else(|e| {
                // serde_json renders very small/large floats in exponent form
                if text.contains(['e', 'E']) {
                    Decimal::from_scientific(text)
                } else {
                    Err(e)
                }
            })
            .map_err(|e| DecimalError::Invalid {
                raw: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Lenient read: zero when the field is empty or malformed
    pub fn value(&self) -> Decimal {
        self.parse().unwrap_or(Decimal::ZERO)
    }

    /// Lenient read as `f64`
    pub fn value_f64(&self) -> f64 {
        self.value().to_f64().unwrap_or(0.0)
    }
}

impl From<Decimal> for FixedDecimal {
    fn from(value: Decimal) -> Self {
        Self::new(value.to_string())
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{}", raw),
            None => write!(f, "null"),
        }
    }
}

impl<'de> Deserialize<'de> for FixedDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Numbers are taken as the exact token text so no digits pass through f64
        let token = Box::<RawValue>::deserialize(deserializer)?;
        let text = token.get().trim();

        let raw = if text == "null" {
            None
        } else if text.starts_with('"') {
            Some(serde_json::from_str::<String>(text).map_err(D::Error::custom)?)
        } else {
            Some(text.to_string())
        };

        Ok(Self { raw })
    }
}

impl Serialize for FixedDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.raw {
            Some(raw) => serializer.serialize_str(raw),
            None => serializer.serialize_none(),
        }
    }
}
