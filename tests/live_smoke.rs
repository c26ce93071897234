use std::sync::Arc;

use coinsph_api_client::auth::EnvCredentials;
use coinsph_api_client::rest::{CoinsRestClient, CryptoPaymentsRequest, StatementRequest};

fn live_tests_enabled() -> bool {
    std::env::var("COINSPH_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn live_client() -> Option<CoinsRestClient> {
    let credentials = EnvCredentials::try_from_env()?;
    Some(
        CoinsRestClient::builder()
            .credentials(Arc::new(credentials))
            .build(),
    )
}

#[tokio::test]
#[ignore]
async fn live_account_and_payments_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    let Some(client) = live_client() else {
        return Ok(());
    };

    let accounts = client.get_account().await?;
    assert!(accounts.is_object());

    let payments = client
        .get_crypto_payments(&CryptoPaymentsRequest::new().all(true))
        .await?;
    assert!(payments["meta"]["next_page"].is_null());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_statement_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    let Some(client) = live_client() else {
        return Ok(());
    };

    let statement = client
        .get_transactions(&StatementRequest::new(1, 2024))
        .await?;
    for record in statement.records(None) {
        record?;
    }

    Ok(())
}
