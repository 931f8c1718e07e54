//! HTTP client and request pipeline for the Zai API.
//!
//! This module provides the main entry point [`ZaiClient`] and its
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use zai_rs::{ClientConfig, ClientCredentials, EndpointConfig, ZaiClient};
//!
//! # async fn example() -> zai_rs::Result<()> {
//! let config = ClientConfig::default().with_endpoints(EndpointConfig::new(
//!     "https://auth.example.com/tokens",
//!     "https://api.example.com/",
//! )?);
//!
//! let client = ZaiClient::with_config(
//!     ClientCredentials::new("id", "secret", "scope"),
//!     config,
//! )?;
//!
//! let users = client.users().list(None).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{
    ClientConfig, EndpointConfig, RetryConfig, RetryScope, SANDBOX_API_ENDPOINT,
    SANDBOX_TOKEN_ENDPOINT,
};
pub use http::ZaiClient;
pub(crate) use http::ClientInner;
