//! Demo: BTCUSD index price every four hours over the last day
//!
//! Run: cargo run --bin price_history

use bavg_sdk::prelude::*;
use chrono::{Duration, Utc};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BitcoinAverageClient::from_env()?;
    let pair = Pair::new(Pair::BTC_USD);
    let now = Utc::now();

    println!("{}", format!("{} over the last 24 hours", pair).cyan().bold());
    for hours_ago in (0..24).step_by(4) {
        let at = now - Duration::hours(hours_ago);
        match client
            .price_at_timestamp(&pair, at, HistoryResolution::Hour)
            .await
        {
            Ok(data) => println!("  {}  {}", data.time, data.average),
            Err(e) if e.is_retryable() => eprintln!("  {} {}", "retry later:".yellow(), e),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
