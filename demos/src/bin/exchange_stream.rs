//! Demo: live per-exchange quotes
//!
//! Run: cargo run --bin exchange_stream -- bitstamp kraken

use bavg_sdk::prelude::*;
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut exchanges: Vec<String> = std::env::args().skip(1).collect();
    if exchanges.is_empty() {
        exchanges.push("bitstamp".to_string());
    }

    let client = BitcoinAverageClient::builder(Credentials::from_env()?)
        .with_data_capacity(16)
        .build()?;

    let mut session = match client.exchange_stream(&exchanges).await {
        Ok(session) => session,
        Err(SdkError::Stream(WsError::SubscriptionRejected { topic, got })) => {
            eprintln!("{} {} rejected: {}", "✗".red(), topic, got);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut updates = 0;
    while let Some(exchange) = session.data.recv().await {
        println!("{}", exchange.display_name.cyan().bold());
        for (pair, quote) in &exchange.symbols {
            println!("  {:<10} last {}  volume {}", pair.as_str(), quote.last, quote.volume);
        }

        updates += 1;
        if updates == 10 {
            break;
        }
    }

    while let Ok(err) = session.errors.try_recv() {
        eprintln!("{} {}", "✗".red(), err);
    }

    session.stop.stop_and_wait().await;
    Ok(())
}
