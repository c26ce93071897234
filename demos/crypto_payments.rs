//! Example: Fetching every crypto payment across pages.
//!
//! Run with: cargo run --example crypto_payments

use std::sync::Arc;
use std::time::Duration;

use coinsph_api_client::auth::EnvCredentials;
use coinsph_api_client::rest::{CoinsRestClient, CryptoPaymentsRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set COINSPH_API_TOKEN to run this example.");
            return Ok(());
        }
    };
    let client = CoinsRestClient::builder()
        .credentials(credentials)
        .timeout(Duration::from_secs(30))
        .max_pages(50)
        .build();

    let first = client
        .get_crypto_payments(&CryptoPaymentsRequest::new().per_page(20))
        .await?;
    println!("First page cursor: {}", first["meta"]["next_page"]);

    let all = client
        .get_crypto_payments(&CryptoPaymentsRequest::new().per_page(20).all(true))
        .await?;
    let count = all["crypto-payments"].as_array().map_or(0, Vec::len);
    println!("Total crypto payments: {count}");

    Ok(())
}
