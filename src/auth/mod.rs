//! Authentication for the Zai API.
//!
//! Zai uses the OAuth2 client-credentials grant: a client id, secret and
//! scope are posted to a token endpoint in exchange for a bearer access
//! token. The client does this lazily, the first time the API answers 401,
//! and again whenever a stored token is rejected.
//!
//! ```no_run
//! use zai_rs::{ClientCredentials, ZaiClient};
//!
//! # async fn example() -> zai_rs::Result<()> {
//! let client = ZaiClient::new(ClientCredentials::new(
//!     "your-client-id",
//!     "your-client-secret",
//!     "your-scope",
//! ))?;
//!
//! // Optional: fetch a token up front instead of on the first 401
//! client.authenticate().await?;
//! assert!(client.session().has_access_token().await);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod session;

pub use credentials::ClientCredentials;
pub use session::Session;
