//! Coins.ph REST API client.
//!
//! - [`CoinsRestClient::send`] is the authenticated transport.
//! - [`ResourceQuery`] builds listing and item URLs; [`CoinsRestClient::list`]
//!   and friends run them.
//! - [`CoinsRestClient::fetch_all`] follows `meta.next_page` cursors and
//!   merges the pages.
//! - [`CoinsRestClient::get_transactions`] downloads balance statements for
//!   the [`statement`](crate::statement) parser.
//!
//! # Trait-based API
//!
//! The [`CoinsClient`] trait abstracts the operations for mocking and
//! decoration.

mod client;
mod endpoints;
mod outlets;
mod paging;
mod query;
mod resources;
mod statements;
mod traits;

pub use client::{CoinsRestClient, CoinsRestClientBuilder, DEFAULT_MAX_PAGES, RawResponse};
pub use endpoints::*;
pub use outlets::Carrier;
pub use paging::{AggregateResult, CryptoPaymentsRequest, Page};
pub use query::{DEFAULT_LIMIT, DEFAULT_OFFSET, Filters, ResourceQuery};
pub use statements::{DEFAULT_STATEMENT_CURRENCY, StatementRequest};
pub use traits::CoinsClient;

pub use reqwest::Method;
