//! # zai-rs
//!
//! An async Rust client for the Zai (formerly Assembly Payments) REST API.
//!
//! The client authenticates with the OAuth2 client-credentials grant and
//! keeps the resulting bearer token in memory. Tokens are fetched lazily:
//! when the API answers 401, the client exchanges its credentials for a new
//! token and resends the request, up to a configurable retry ceiling.
//!
//! ## Features
//!
//! - **Authentication**: client-credentials token exchange with transparent
//!   refresh on 401
//! - **Bounded retries**: [`Error::TooManyRetries`] instead of endless
//!   re-authentication when credentials are wrong
//! - **Resources**: users and companies with list/show/create/update, plus
//!   user sub-resources and pre-live identity verification
//! - **Raw responses**: every call returns the `reqwest::Response`, whatever
//!   its status
//! - **Async-first**: built on Tokio and reqwest; clients are cheap to clone
//!   and token refresh is single-flight across tasks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zai_rs::{ClientCredentials, ListQuery, ZaiClient};
//!
//! #[tokio::main]
//! async fn main() -> zai_rs::Result<()> {
//!     // Sandbox endpoints are used by default
//!     let client = ZaiClient::new(ClientCredentials::new(
//!         "client-id",
//!         "client-secret",
//!         "scope",
//!     ))?;
//!
//!     // List the first ten users
//!     let response = client.users().list(Some(&ListQuery::new().limit(10))).await?;
//!     println!("status: {}", response.status());
//!
//!     // Create a company
//!     let response = client
//!         .companies()
//!         .create(&serde_json::json!({ "name": "Acme Pty Ltd", "user_id": "42" }))
//!         .await?;
//!     println!("status: {}", response.status());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;

// Re-export primary types at crate root for convenience
pub use api::{Companies, ListQuery, Resource, Users};
pub use auth::{ClientCredentials, Session};
pub use client::{
    ClientConfig, EndpointConfig, RetryConfig, RetryScope, ZaiClient, SANDBOX_API_ENDPOINT,
    SANDBOX_TOKEN_ENDPOINT,
};
pub use error::{Error, Result};

pub use reqwest::{Method, Response, StatusCode};

/// Prelude module for convenient imports.
///
/// ```rust
/// use zai_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Companies, Creatable, ListQuery, Listable, Resource, ResourceKind, Showable, Updatable,
        Users,
    };
    pub use crate::auth::{ClientCredentials, Session};
    pub use crate::client::{ClientConfig, EndpointConfig, RetryConfig, RetryScope, ZaiClient};
    pub use crate::error::{Error, Result};
}
