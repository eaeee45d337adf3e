//! Demo: live global index tickers
//!
//! Needs BTC_AVERAGE_PUBLIC_KEY and BTC_AVERAGE_SECRET_KEY.
//!
//! Run: cargo run --bin ticker_stream -- BTCUSD ETHUSD

use bavg_sdk::prelude::*;
use colored::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut currencies: Vec<String> = std::env::args().skip(1).collect();
    if currencies.is_empty() {
        currencies.push(Pair::BTC_USD.to_string());
    }

    let client = BitcoinAverageClient::from_env()?;
    let mut session = client.ticker_stream(&currencies).await?;
    println!("{} Streaming {}", "✓".green(), currencies.join(", ").bold());

    let deadline = tokio::time::sleep(Duration::from_secs(60));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            ticker = session.data.recv() => match ticker {
                Some(ticker) => println!(
                    "  {} {}  {} {}  {} {}",
                    "LAST:".yellow(),
                    ticker.last,
                    "BID:".yellow(),
                    ticker.bid,
                    "SPREAD:".green(),
                    ticker.spread(),
                ),
                None => break,
            },
            Some(err) = session.errors.recv() => {
                eprintln!("{} {}", "✗".red(), err);
            }
        }
    }

    let reason = session.stop.stop_and_wait().await;
    println!("Stream finished: {:?}", reason);
    Ok(())
}
