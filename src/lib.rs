//! # Coins.ph Client
//!
//! An async Rust client library for the Coins.ph REST API.
//!
//! ## Features
//!
//! - Order, payout-outlet, crypto-payment and crypto-account endpoints
//! - Transparent merging of cursor-paged listings (`meta.next_page`)
//! - Lazy, filterable parsing of the CRLF-delimited balance-statement feed
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinsph_api_client::auth::EnvCredentials;
//! use coinsph_api_client::rest::{CoinsRestClient, CryptoPaymentsRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinsRestClient::builder()
//!         .credentials(Arc::new(EnvCredentials::from_env()))
//!         .build();
//!     let payments = client
//!         .get_crypto_payments(&CryptoPaymentsRequest::new().all(true))
//!         .await?;
//!     println!("Payments: {}", payments["crypto-payments"]);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod statement;

// Re-export commonly used types at crate root
pub use error::CoinsError;
pub use statement::{FilterSpec, Statement, TransactionField, TransactionRecord};

/// Result type alias using CoinsError
pub type Result<T> = std::result::Result<T, CoinsError>;
