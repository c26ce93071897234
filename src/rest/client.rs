//! Coins.ph REST API client and HTTP transport.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use tracing::{debug, warn};
use url::Url;

use crate::auth::CredentialsProvider;
use crate::error::CoinsError;
use crate::rest::endpoints::{COINSPH_BASE_URL, ORDERS_BASE_URL};

/// Page cap applied by [`CoinsRestClient::fetch_all`] unless configured otherwise.
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// The Coins.ph REST API client.
///
/// Every request carries the configured bearer token together with JSON
/// `Content-Type` and `Accept` headers. Requests are single attempts with no
/// deadline unless the builder opts into retries or a timeout.
///
/// # Example
///
/// ```rust,no_run
/// use coinsph_api_client::auth::StaticCredentials;
/// use coinsph_api_client::rest::{CoinsRestClient, Filters};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinsRestClient::builder()
///         .credentials(Arc::new(StaticCredentials::new("token")))
///         .build();
///
///     let orders = client.list("sellorder", None, &Filters::new()).await?;
///     println!("Orders: {}", orders);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinsRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    orders_base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    max_pages: usize,
}

impl CoinsRestClient {
    /// Create a client without credentials.
    ///
    /// Every call on it fails with [`CoinsError::MissingCredentials`]; use
    /// [`CoinsRestClient::builder()`] to supply a token.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoinsRestClientBuilder {
        CoinsRestClientBuilder::new()
    }

    /// Base URL of the v3 API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL of the order API.
    pub fn orders_base_url(&self) -> &str {
        &self.orders_base_url
    }

    /// Maximum number of pages a single paged walk may fetch.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Send one authenticated request.
    ///
    /// A response with any status code is returned as-is; only failures to
    /// obtain a response at all become [`CoinsError::Transport`].
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, CoinsError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(CoinsError::MissingCredentials)?;

        debug!(%method, %url, "sending request");
        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, credentials.get_credentials().bearer())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_string(body)?);
        }

        let transport_error = |source: reqwest_middleware::Error| CoinsError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e.into()))?;

        Ok(RawResponse {
            method,
            url: url.to_string(),
            status,
            body: text,
        })
    }

    /// GET `url`, require status 200 and decode the JSON body.
    pub(crate) async fn get_json<T>(&self, url: Url) -> Result<T, CoinsError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::GET, url, None)
            .await?
            .expect_status(StatusCode::OK.as_u16())?
            .json()
    }
}

impl Default for CoinsRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoinsRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinsRestClient")
            .field("base_url", &self.base_url)
            .field("orders_base_url", &self.orders_base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

/// A response as received, before any status expectation is applied.
#[derive(Debug, Clone)]
pub struct RawResponse {
    method: Method,
    url: String,
    status: StatusCode,
    body: String,
}

impl RawResponse {
    /// Numeric status code.
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The URL the request was sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Consume the response, keeping only the body.
    pub fn into_text(self) -> String {
        self.body
    }

    /// Decode the body as JSON.
    pub fn json<T>(&self) -> Result<T, CoinsError>
    where
        T: serde::de::DeserializeOwned,
    {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Pass the response through only if its status equals `expected`.
    pub fn expect_status(self, expected: u16) -> Result<Self, CoinsError> {
        let actual = self.status();
        if actual == expected {
            return Ok(self);
        }
        warn!(
            method = %self.method,
            url = %self.url,
            expected,
            actual,
            "unexpected response status"
        );
        Err(CoinsError::UnexpectedStatus {
            expected,
            actual,
            url: self.url,
        })
    }
}

/// Builder for [`CoinsRestClient`].
pub struct CoinsRestClientBuilder {
    base_url: String,
    orders_base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
    max_pages: usize,
}

impl CoinsRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: COINSPH_BASE_URL.to_string(),
            orders_base_url: ORDERS_BASE_URL.to_string(),
            credentials: None,
            user_agent: None,
            timeout: None,
            max_retries: 0,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Set the v3 API base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the order API base URL (useful for testing with a mock server).
    pub fn orders_base_url(mut self, url: impl Into<String>) -> Self {
        self.orders_base_url = url.into();
        self
    }

    /// Set the credentials provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Apply a per-request deadline. Requests have none by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retry transient failures up to `retries` times. Defaults to 0.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Cap the number of pages a paged walk may fetch.
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages.max(1);
        self
    }

    /// Build the client.
    pub fn build(self) -> CoinsRestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("coinsph-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinsph-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build().unwrap_or_else(|error| {
            warn!(%error, "falling back to a default HTTP client; user agent and timeout are not applied");
            reqwest::Client::new()
        });

        let mut middleware = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            middleware = middleware.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        CoinsRestClient {
            http_client: middleware.build(),
            base_url: self.base_url,
            orders_base_url: self.orders_base_url,
            credentials: self.credentials,
            max_pages: self.max_pages,
        }
    }
}

impl Default for CoinsRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
