//! Endpoint URL construction for listing and single-item resources.

use url::Url;

use crate::error::CoinsError;

/// Page size applied to offset-paged listings when the caller sets none.
pub const DEFAULT_LIMIT: u32 = 10;

/// Offset applied to offset-paged listings when the caller sets none.
pub const DEFAULT_OFFSET: u32 = 0;

/// Ordered query parameters.
///
/// Keys are unique; setting an existing key replaces its value in place, so
/// the encoded query string keeps the order in which keys were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Filters::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Set `key` only if the caller has not already supplied it.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.0.push((key, value.to_string()));
        }
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encode as `k1=v1&k2=v2`.
    pub fn encode(&self) -> Result<String, CoinsError> {
        Ok(serde_urlencoded::to_string(&self.0)?)
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (k, v) in iter {
            filters.set(k, v);
        }
        filters
    }
}

/// An immutable description of one request target.
///
/// ```rust
/// use coinsph_api_client::rest::{Filters, ResourceQuery};
///
/// let url = ResourceQuery::new("https://api.coins.asia/v1", "/sellorder")
///     .filters(&Filters::new().with("external_transaction_id", "X"))
///     .offset_defaults()
///     .to_url()
///     .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://api.coins.asia/v1/sellorder?external_transaction_id=X&limit=10&offset=0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    base_url: String,
    path: String,
    id: Option<String>,
    params: Filters,
}

impl ResourceQuery {
    /// Target `path` under `base_url`.
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            id: None,
            params: Filters::new(),
        }
    }

    /// Address a single item: the path gains a `/{id}/` suffix.
    pub fn item(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Merge caller filters into the query parameters.
    pub fn filters(mut self, filters: &Filters) -> Self {
        for (k, v) in filters.iter() {
            self.params.set(k, v);
        }
        self
    }

    /// Add a single query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.set(key, value);
        self
    }

    /// Fill in `limit`/`offset` where the caller left them unset.
    pub fn offset_defaults(mut self) -> Self {
        self.params.set_default("limit", DEFAULT_LIMIT);
        self.params.set_default("offset", DEFAULT_OFFSET);
        self
    }

    /// Query parameters in encoding order.
    pub fn params(&self) -> &Filters {
        &self.params
    }

    /// Serialize into a single percent-encoded URL.
    pub fn to_url(&self) -> Result<Url, CoinsError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, self.path))?;
        if let Some(id) = &self.id {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CoinsError::InvalidResponse(format!("cannot address items under {}", self.base_url))
            })?;
            segments.pop_if_empty().push(id).push("");
        }
        if !self.params.is_empty() {
            url.set_query(Some(&self.params.encode()?));
        }
        Ok(url)
    }
}
