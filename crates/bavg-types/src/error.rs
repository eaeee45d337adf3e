//! Error types for value parsing

use thiserror::Error;

/// Failure to read a [`FixedDecimal`](crate::FixedDecimal) as a number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    /// The field was `null` or missing
    #[error("numeric field is empty")]
    Empty,

    /// The field text is not a number
    #[error("invalid numeric field {raw:?}: {reason}")]
    Invalid { raw: String, reason: String },
}
