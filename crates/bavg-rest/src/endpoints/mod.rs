//! API endpoint implementations

pub mod market;

pub use market::MarketEndpoints;
