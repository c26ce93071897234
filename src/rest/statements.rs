//! Balance-statement retrieval.

use reqwest::{Method, StatusCode};

use crate::error::CoinsError;
use crate::rest::CoinsRestClient;
use crate::rest::endpoints::v3;
use crate::rest::query::ResourceQuery;
use crate::statement::Statement;

/// Currency requested when the caller does not pick one.
pub const DEFAULT_STATEMENT_CURRENCY: &str = "PBTC";

/// Request parameters for [`CoinsRestClient::get_transactions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    /// Month, 1-12.
    pub month: u8,
    /// Four-digit year.
    pub year: u16,
    /// Currency symbol; `None` requests every currency.
    pub currency: Option<String>,
}

impl StatementRequest {
    /// Statement for `month`/`year` in the default currency.
    pub fn new(month: u8, year: u16) -> Self {
        Self {
            month,
            year,
            currency: Some(DEFAULT_STATEMENT_CURRENCY.to_string()),
        }
    }

    /// Request a specific currency instead of the default.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Drop the currency parameter.
    pub fn all_currencies(mut self) -> Self {
        self.currency = None;
        self
    }
}

impl CoinsRestClient {
    /// Download a monthly balance statement.
    ///
    /// The body is returned unparsed; decode it with [`Statement::records`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinsph_api_client::auth::EnvCredentials;
    /// use coinsph_api_client::rest::{CoinsRestClient, StatementRequest};
    /// use coinsph_api_client::statement::FilterSpec;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinsRestClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()))
    ///         .build();
    ///
    ///     let statement = client.get_transactions(&StatementRequest::new(1, 2023)).await?;
    ///     let deposits = FilterSpec::new().with("entry_type", "deposit");
    ///     for record in statement.records(Some(&deposits)) {
    ///         let record = record?;
    ///         println!("{:?} {:?}", record.transaction_id(), record.amount());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_transactions(
        &self,
        request: &StatementRequest,
    ) -> Result<Statement, CoinsError> {
        let mut query = ResourceQuery::new(self.base_url(), v3::BALANCE_STATEMENTS)
            .param("month", request.month)
            .param("year", request.year);
        if let Some(currency) = &request.currency {
            query = query.param("currency", currency);
        }

        let response = self
            .send(Method::GET, query.to_url()?, None)
            .await?
            .expect_status(StatusCode::OK.as_u16())?;
        Ok(Statement::new(response.into_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_request_currency() {
        let request = StatementRequest::new(3, 2024);
        assert_eq!(request.currency.as_deref(), Some("PBTC"));
        assert_eq!(request.clone().currency("PHP").currency.as_deref(), Some("PHP"));
        assert_eq!(request.all_currencies().currency, None);
    }
}
