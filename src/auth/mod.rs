//! Authentication for the Coins.ph API.
//!
//! Every request carries an `Authorization: Bearer <token>` header. The token
//! is supplied once when the client is built and never refreshed.

mod credentials;

pub use credentials::{
    Credentials, CredentialsProvider, EnvCredentials, StaticCredentials, TOKEN_ENV_VAR,
};
