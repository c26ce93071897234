//! Trait definition for the Coins.ph REST API client.
//!
//! [`CoinsClient`] abstracts the REST operations so callers can substitute a
//! mock or wrap the client with decorators.
//!
//! ```rust,ignore
//! use coinsph_api_client::rest::{CoinsClient, Filters};
//!
//! async fn count_orders<C: CoinsClient>(client: &C) -> coinsph_api_client::Result<usize> {
//!     let orders = client.list("sellorder", None, &Filters::new()).await?;
//!     Ok(orders["orders"].as_array().map_or(0, Vec::len))
//! }
//! ```

use std::future::Future;

use serde_json::Value;

use crate::error::CoinsError;
use crate::rest::CoinsRestClient;
use crate::rest::paging::{AggregateResult, CryptoPaymentsRequest};
use crate::rest::query::{Filters, ResourceQuery};
use crate::rest::statements::StatementRequest;
use crate::statement::Statement;

/// Trait defining the Coins.ph REST operations.
pub trait CoinsClient: Send + Sync {
    // ========== Orders & outlets ==========

    /// List orders of a type, or fetch one by id.
    fn list(
        &self,
        resource: &str,
        id: Option<&str>,
        filters: &Filters,
    ) -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// Fetch a single order.
    fn get(&self, resource: &str, id: &str)
    -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// List payout outlets.
    fn list_payout_outlets(
        &self,
        filters: &Filters,
    ) -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// Fetch a single payout outlet.
    fn get_payout_outlet(&self, id: &str)
    -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// Look up the payout outlet for a mobile number's carrier.
    fn fetch_outlet_data(
        &self,
        phone_number: &str,
    ) -> impl Future<Output = Result<Value, CoinsError>> + Send;

    // ========== Crypto payments ==========

    /// Look up crypto payments by referenced order id.
    fn fetch_crypto_payment(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// Fetch a single crypto payment.
    fn get_crypto_payment(&self, id: &str)
    -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// List crypto payments, optionally merging every page.
    fn get_crypto_payments(
        &self,
        request: &CryptoPaymentsRequest,
    ) -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// Walk a cursor-paged endpoint and merge every page.
    fn fetch_all(
        &self,
        query: &ResourceQuery,
        items_key: &str,
        per_page: u32,
        start_page: u64,
    ) -> impl Future<Output = Result<AggregateResult, CoinsError>> + Send;

    // ========== Account ==========

    /// Get the crypto accounts.
    fn get_account(&self) -> impl Future<Output = Result<Value, CoinsError>> + Send;

    /// Download a monthly balance statement.
    fn get_transactions(
        &self,
        request: &StatementRequest,
    ) -> impl Future<Output = Result<Statement, CoinsError>> + Send;
}

impl CoinsClient for CoinsRestClient {
    async fn list(
        &self,
        resource: &str,
        id: Option<&str>,
        filters: &Filters,
    ) -> Result<Value, CoinsError> {
        CoinsRestClient::list(self, resource, id, filters).await
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Value, CoinsError> {
        CoinsRestClient::get(self, resource, id).await
    }

    async fn list_payout_outlets(&self, filters: &Filters) -> Result<Value, CoinsError> {
        CoinsRestClient::list_payout_outlets(self, filters).await
    }

    async fn get_payout_outlet(&self, id: &str) -> Result<Value, CoinsError> {
        CoinsRestClient::get_payout_outlet(self, id).await
    }

    async fn fetch_outlet_data(&self, phone_number: &str) -> Result<Value, CoinsError> {
        CoinsRestClient::fetch_outlet_data(self, phone_number).await
    }

    async fn fetch_crypto_payment(&self, order_id: &str) -> Result<Value, CoinsError> {
        CoinsRestClient::fetch_crypto_payment(self, order_id).await
    }

    async fn get_crypto_payment(&self, id: &str) -> Result<Value, CoinsError> {
        CoinsRestClient::get_crypto_payment(self, id).await
    }

    async fn get_crypto_payments(
        &self,
        request: &CryptoPaymentsRequest,
    ) -> Result<Value, CoinsError> {
        CoinsRestClient::get_crypto_payments(self, request).await
    }

    async fn fetch_all(
        &self,
        query: &ResourceQuery,
        items_key: &str,
        per_page: u32,
        start_page: u64,
    ) -> Result<AggregateResult, CoinsError> {
        CoinsRestClient::fetch_all(self, query, items_key, per_page, start_page).await
    }

    async fn get_account(&self) -> Result<Value, CoinsError> {
        CoinsRestClient::get_account(self).await
    }

    async fn get_transactions(&self, request: &StatementRequest) -> Result<Statement, CoinsError> {
        CoinsRestClient::get_transactions(self, request).await
    }
}
