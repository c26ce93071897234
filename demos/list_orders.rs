//! Example: Listing sell orders and payout outlets.
//!
//! Run with: cargo run --example list_orders

use std::sync::Arc;

use coinsph_api_client::auth::EnvCredentials;
use coinsph_api_client::rest::{CoinsRestClient, Filters};

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
    let client = CoinsRestClient::builder().credentials(credentials).build();

    // Defaults to limit=10&offset=0.
    let orders = client.list("sellorder", None, &Filters::new()).await?;
    println!("Sell orders: {}", orders["orders"]);

    let outlets = client
        .list_payout_outlets(&Filters::new().with("limit", 5))
        .await?;
    println!("Payout outlets: {}", outlets["payout-outlets"]);

    Ok(())
}
