//! Coins.ph REST API endpoint constants.

/// Base URL for the Coins.ph v3 API (payments, statements, accounts, outlets).
pub const COINSPH_BASE_URL: &str = "https://coins.ph/api/v3";

/// Base URL for the order API (`sellorder`, `buyorder`, ...).
pub const ORDERS_BASE_URL: &str = "https://api.coins.asia/v1";

/// Paths relative to [`COINSPH_BASE_URL`].
pub mod v3 {
    /// Crypto payments (cursor-paged, items under `crypto-payments`).
    pub const CRYPTO_PAYMENTS: &str = "/crypto-payments";
    /// Balance statements (CRLF-delimited text body).
    pub const BALANCE_STATEMENTS: &str = "/balance-statements/";
    /// Crypto accounts.
    pub const CRYPTO_ACCOUNTS: &str = "/crypto-accounts";
    /// Payout outlets (offset-paged, items under `payout-outlets`).
    pub const PAYOUT_OUTLETS: &str = "/payout-outlets";
}

/// Keys under which paged endpoints return their item arrays.
pub mod items {
    /// Item key of the crypto-payments listing.
    pub const CRYPTO_PAYMENTS: &str = "crypto-payments";
    /// Item key of the payout-outlets listing.
    pub const PAYOUT_OUTLETS: &str = "payout-outlets";
}
