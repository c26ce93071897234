//! Example: Reading deposits from a monthly balance statement.
//!
//! Run with: cargo run --example statement

use std::sync::Arc;

use coinsph_api_client::auth::EnvCredentials;
use coinsph_api_client::rest::{CoinsRestClient, StatementRequest};
use coinsph_api_client::statement::FilterSpec;

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

    let statement = client
        .get_transactions(&StatementRequest::new(1, 2024).currency("PHP"))
        .await?;
    println!("{}", statement.header().unwrap_or("(no header)"));

    let deposits = FilterSpec::new()
        .with("entry_type", "deposit")
        .with("status", "done");
    for record in statement.records(Some(&deposits)) {
        let record = record?;
        println!(
            "{} {} {}",
            record.created_at().unwrap_or("-"),
            record.transaction_id().unwrap_or("-"),
            record.amount().map(|a| a.to_string()).unwrap_or_default()
        );
    }

    Ok(())
}
