//! Simple and filtered resource endpoints: orders, payout outlets, crypto
//! payments by reference and crypto accounts.
//!
//! Bodies are returned as decoded JSON, unmodified.

use serde_json::Value;

use crate::error::CoinsError;
use crate::rest::CoinsRestClient;
use crate::rest::endpoints::v3;
use crate::rest::query::{Filters, ResourceQuery};

/// Build the query for a listing (no id) or a single item (with id).
///
/// Listings page by offset, so they get `limit`/`offset` defaults. Item
/// lookups keep any filters for sub-resource filtering but get no defaults.
/// An empty id is a listing.
pub(crate) fn listing(
    base_url: &str,
    path: &str,
    id: Option<&str>,
    filters: &Filters,
) -> ResourceQuery {
    let query = ResourceQuery::new(base_url, path).filters(filters);
    match id.filter(|id| !id.is_empty()) {
        Some(id) => query.item(id),
        None => query.offset_defaults(),
    }
}

fn resource_path(resource: &str) -> String {
    format!("/{}", resource.trim_matches('/'))
}

impl CoinsRestClient {
    /// List orders of type `resource` (e.g. `"sellorder"`), or fetch one by id.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinsph_api_client::auth::EnvCredentials;
    /// use coinsph_api_client::rest::{CoinsRestClient, Filters};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinsRestClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()))
    ///         .build();
    ///
    ///     // GET /sellorder?external_transaction_id=X&limit=10&offset=0
    ///     let filters = Filters::new().with("external_transaction_id", "X");
    ///     let orders = client.list("sellorder", None, &filters).await?;
    ///     println!("{}", orders["orders"]);
    ///     Ok(())
    /// }
    /// ```
    pub async fn list(
        &self,
        resource: &str,
        id: Option<&str>,
        filters: &Filters,
    ) -> Result<Value, CoinsError> {
        let query = listing(self.orders_base_url(), &resource_path(resource), id, filters);
        self.get_json(query.to_url()?).await
    }

    /// Fetch a single order by id.
    pub async fn get(&self, resource: &str, id: &str) -> Result<Value, CoinsError> {
        self.list(resource, Some(id), &Filters::new()).await
    }

    /// List payout outlets (offset-paged, items under `payout-outlets`).
    pub async fn list_payout_outlets(&self, filters: &Filters) -> Result<Value, CoinsError> {
        let query = listing(self.base_url(), v3::PAYOUT_OUTLETS, None, filters);
        self.get_json(query.to_url()?).await
    }

    /// Fetch a single payout outlet.
    pub async fn get_payout_outlet(&self, id: &str) -> Result<Value, CoinsError> {
        let query = listing(self.base_url(), v3::PAYOUT_OUTLETS, Some(id), &Filters::new());
        self.get_json(query.to_url()?).await
    }

    /// Look up the crypto payments that reference an order.
    pub async fn fetch_crypto_payment(&self, order_id: &str) -> Result<Value, CoinsError> {
        let url = ResourceQuery::new(self.base_url(), v3::CRYPTO_PAYMENTS)
            .param("reference__order_id", order_id)
            .to_url()?;
        self.get_json(url).await
    }

    /// Fetch a single crypto payment by id.
    pub async fn get_crypto_payment(&self, id: &str) -> Result<Value, CoinsError> {
        let url = ResourceQuery::new(self.base_url(), v3::CRYPTO_PAYMENTS)
            .item(id)
            .to_url()?;
        self.get_json(url).await
    }

    /// Get the crypto accounts (wallet balances) of the token owner.
    pub async fn get_account(&self) -> Result<Value, CoinsError> {
        let url = ResourceQuery::new(self.base_url(), v3::CRYPTO_ACCOUNTS).to_url()?;
        self.get_json(url).await
    }
}
