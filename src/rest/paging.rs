//! Cursor-following pagination.
//!
//! Cursor-paged endpoints take `page`/`per_page` query parameters and answer
//! with an item array under a resource-specific key plus a `meta` object whose
//! `next_page` is either the next page number or `null`:
//!
//! ```json
//! { "crypto-payments": [ ... ], "meta": { "next_page": 2 } }
//! ```
//!
//! [`CoinsRestClient::pages`] produces the sequence of [`Page`]s, following
//! each page's cursor, and [`CoinsRestClient::fetch_all`] folds that sequence
//! into one [`AggregateResult`]. Each cursor is only known once the previous
//! page is decoded, so pages are fetched strictly one after another.

use std::collections::HashSet;

use futures_util::stream::{self, Stream, TryStreamExt};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CoinsError;
use crate::rest::CoinsRestClient;
use crate::rest::endpoints::{items, v3};
use crate::rest::query::ResourceQuery;

/// Key of the pagination metadata object.
const META_KEY: &str = "meta";

/// Key of the cursor inside the metadata object.
const NEXT_PAGE_KEY: &str = "next_page";

/// One decoded response of a cursor-paged endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number this page was fetched with.
    pub number: u64,
    /// Items under the resource key. Empty when the key is absent.
    pub items: Vec<Value>,
    /// Cursor of the following page; `None` on the terminal page.
    pub next_page: Option<u64>,
    /// The page's `meta` object, cursor included.
    pub meta: Map<String, Value>,
    /// Every other top-level key of the body.
    pub extra: Map<String, Value>,
}

impl Page {
    /// Split a decoded page body into items, cursor and the remainder.
    pub fn from_body(number: u64, body: Value, items_key: &str) -> Result<Self, CoinsError> {
        let Value::Object(mut extra) = body else {
            return Err(CoinsError::InvalidResponse(format!(
                "page {number} is not a JSON object"
            )));
        };

        let items = match extra.remove(items_key) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                debug!(page = number, items_key, "page has no item list, treating as empty");
                Vec::new()
            }
            Some(other) => {
                return Err(CoinsError::InvalidResponse(format!(
                    "page {number}: `{items_key}` is not an array: {other}"
                )));
            }
        };

        let meta = match extra.remove(META_KEY) {
            Some(Value::Object(meta)) => meta,
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                return Err(CoinsError::InvalidResponse(format!(
                    "page {number}: `meta` is not an object: {other}"
                )));
            }
        };

        let next_page = match meta.get(NEXT_PAGE_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_u64().ok_or_else(|| {
                CoinsError::InvalidResponse(format!(
                    "page {number}: `next_page` is not a page number: {value}"
                ))
            })?),
        };

        Ok(Self {
            number,
            items,
            next_page,
            meta,
            extra,
        })
    }
}

/// Items of every page of a walk, in fetch order.
///
/// Only the first page's metadata survives, with its cursor cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    items_key: String,
    /// Concatenated items of pages 1..N.
    pub items: Vec<Value>,
    /// First page's `meta`, with `next_page` set to `null`.
    pub meta: Map<String, Value>,
    /// First page's other top-level keys.
    pub extra: Map<String, Value>,
    /// Number of pages folded in.
    pub pages: usize,
}

impl AggregateResult {
    fn first(items_key: &str, page: Page) -> Self {
        let mut meta = page.meta;
        meta.insert(NEXT_PAGE_KEY.to_string(), Value::Null);
        Self {
            items_key: items_key.to_string(),
            items: page.items,
            meta,
            extra: page.extra,
            pages: 1,
        }
    }

    fn absorb(mut self, page: Page) -> Self {
        self.items.extend(page.items);
        self.pages += 1;
        self
    }

    /// Key the items are stored under.
    pub fn items_key(&self) -> &str {
        &self.items_key
    }

    /// Reassemble the response shape: `{ <items_key>: [...], "meta": {...}, ... }`.
    pub fn into_json(self) -> Value {
        let mut body = self.extra;
        body.insert(self.items_key, Value::Array(self.items));
        body.insert(META_KEY.to_string(), Value::Object(self.meta));
        Value::Object(body)
    }
}

struct Walk {
    next: Option<u64>,
    visited: HashSet<u64>,
}

impl CoinsRestClient {
    /// Stream the pages of `query`, starting at `start_page` and following
    /// `meta.next_page` until it is `null`.
    ///
    /// The walk fails with [`CoinsError::PageCycle`] if a cursor repeats a page
    /// and with [`CoinsError::PageLimitExceeded`] past the configured
    /// `max_pages`.
    pub fn pages<'a>(
        &'a self,
        query: &'a ResourceQuery,
        items_key: &'a str,
        per_page: u32,
        start_page: u64,
    ) -> impl Stream<Item = Result<Page, CoinsError>> + 'a {
        let walk = Walk {
            next: Some(start_page),
            visited: HashSet::new(),
        };

        stream::try_unfold(walk, move |mut walk| async move {
            let Some(number) = walk.next else {
                return Ok(None);
            };
            let url = query
                .clone()
                .param("page", number)
                .param("per_page", per_page)
                .to_url()?;

            if !walk.visited.insert(number) {
                return Err(CoinsError::PageCycle {
                    page: number,
                    url: url.to_string(),
                });
            }
            if walk.visited.len() > self.max_pages() {
                return Err(CoinsError::PageLimitExceeded {
                    limit: self.max_pages(),
                    url: url.to_string(),
                });
            }

            let body: Value = self.get_json(url).await?;
            let page = Page::from_body(number, body, items_key)?;
            debug!(
                page = number,
                items = page.items.len(),
                next_page = ?page.next_page,
                "fetched page"
            );
            walk.next = page.next_page;
            Ok::<_, CoinsError>(Some((page, walk)))
        })
    }

    /// Fetch every page of `query` and merge them into one result.
    pub async fn fetch_all(
        &self,
        query: &ResourceQuery,
        items_key: &str,
        per_page: u32,
        start_page: u64,
    ) -> Result<AggregateResult, CoinsError> {
        let aggregate = self
            .pages(query, items_key, per_page, start_page)
            .try_fold(None, move |acc: Option<AggregateResult>, page| async move {
                Ok(Some(match acc {
                    None => AggregateResult::first(items_key, page),
                    Some(aggregate) => aggregate.absorb(page),
                }))
            })
            .await?;

        aggregate.ok_or_else(|| CoinsError::InvalidResponse("paged walk produced no pages".into()))
    }

    /// List crypto payments.
    ///
    /// With `all` unset this returns the single requested page as-is, cursor
    /// included, so callers can drive the walk themselves. With `all` set the
    /// walk starts at `page` and the merged result is returned.
    pub async fn get_crypto_payments(
        &self,
        request: &CryptoPaymentsRequest,
    ) -> Result<Value, CoinsError> {
        let query = ResourceQuery::new(self.base_url(), format!("{}/", v3::CRYPTO_PAYMENTS));
        if request.all {
            let aggregate = self
                .fetch_all(&query, items::CRYPTO_PAYMENTS, request.per_page, request.page)
                .await?;
            return Ok(aggregate.into_json());
        }

        let url = query
            .param("page", request.page)
            .param("per_page", request.per_page)
            .to_url()?;
        self.get_json(url).await
    }
}

/// Request parameters for [`CoinsRestClient::get_crypto_payments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoPaymentsRequest {
    /// Page to fetch (or to start the walk from).
    pub page: u64,
    /// Page size.
    pub per_page: u32,
    /// Follow `next_page` and merge every page.
    pub all: bool,
}

impl CryptoPaymentsRequest {
    /// First page, 100 per page, single-page mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page to fetch, or to start the walk from.
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Follow `next_page` cursors and merge every page.
    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }
}

impl Default for CryptoPaymentsRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
            all: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_body_splits_fields() {
        let body = json!({
            "crypto-payments": [{"id": "a"}, {"id": "b"}],
            "meta": {"next_page": 2, "total": 3},
            "status": "ok"
        });
        let page = Page::from_body(1, body, "crypto-payments").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.meta["total"], json!(3));
        assert_eq!(page.extra["status"], json!("ok"));
    }

    #[test]
    fn test_missing_items_key_is_empty_page() {
        let page = Page::from_body(3, json!({"meta": {"next_page": null}}), "crypto-payments")
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_non_integer_cursor_is_rejected() {
        let err = Page::from_body(1, json!({"meta": {"next_page": "two"}}), "x").unwrap_err();
        assert!(matches!(err, CoinsError::InvalidResponse(_)));
    }

    #[test]
    fn test_aggregate_keeps_first_meta_without_cursor() {
        let first = Page::from_body(
            1,
            json!({"items": ["A", "B"], "meta": {"next_page": 2, "per_page": 2}}),
            "items",
        )
        .unwrap();
        let second = Page::from_body(
            2,
            json!({"items": ["C"], "meta": {"next_page": null, "per_page": 99}}),
            "items",
        )
        .unwrap();

        let aggregate = AggregateResult::first("items", first).absorb(second);
        assert_eq!(aggregate.pages, 2);
        assert_eq!(
            aggregate.into_json(),
            json!({"items": ["A", "B", "C"], "meta": {"next_page": null, "per_page": 2}})
        );
    }

    #[test]
    fn test_crypto_payments_request_defaults() {
        let request = CryptoPaymentsRequest::new();
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 100);
        assert!(!request.all);
    }
}
