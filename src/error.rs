//! Error types for the Coins.ph client library.

use thiserror::Error;

/// The main error type for all Coins.ph client operations.
#[derive(Error, Debug)]
pub enum CoinsError {
    /// The request never produced a response (DNS, connect, timeout, reset).
    #[error("{method} request to {url} failed: {source}")]
    Transport {
        /// HTTP method of the failed request
        method: reqwest::Method,
        /// Fully built request URL
        url: String,
        /// Underlying transport failure
        #[source]
        source: reqwest_middleware::Error,
    },

    /// A response arrived with a status the operation does not accept.
    #[error("Expected status {expected} from {url} but received {actual}")]
    UnexpectedStatus {
        /// The accepted status code
        expected: u16,
        /// The status code actually received
        actual: u16,
        /// Request URL
        url: String,
    },

    /// A balance-statement line could not be decoded into a transaction record.
    #[error("Malformed statement record at line {line_number}: {reason} ({raw_line:?})")]
    MalformedRecord {
        /// Zero-based line index in the raw body (line 0 is the header)
        line_number: usize,
        /// The offending line, verbatim
        raw_line: String,
        /// What was wrong with it
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query string encoding error
    #[error("Query encoding error: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Response body had an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A paged walk fetched more pages than the configured limit.
    #[error("Pagination of {url} exceeded {limit} pages")]
    PageLimitExceeded {
        /// Configured page limit
        limit: usize,
        /// Endpoint being walked
        url: String,
    },

    /// A `next_page` cursor pointed back at a page already fetched.
    #[error("Pagination of {url} revisited page {page}")]
    PageCycle {
        /// The repeated page number
        page: u64,
        /// Endpoint being walked
        url: String,
    },

    /// A phone number did not belong to a supported mobile carrier.
    #[error("Invalid phone number: {0:?}")]
    InvalidPhoneNumber(String),

    /// Missing required credentials
    #[error("Missing credentials: a bearer token is required")]
    MissingCredentials,
}

impl CoinsError {
    /// Status code carried by this error, if it is a status mismatch.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    /// Check if the server answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Check if the server is throttling requests.
    pub fn is_throttled(&self) -> bool {
        self.status() == Some(429)
    }
}
