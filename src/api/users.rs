//! Users resource.

use reqwest::Response;

use super::resource::{Creatable, Listable, Resource, ResourceKind, Showable, Updatable};
use crate::Result;

/// The `users` collection.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: zai_rs::ZaiClient) -> zai_rs::Result<()> {
/// let users = client.users();
///
/// let user = users.show("buyer-42").await?;
/// println!("{}", user.status());
///
/// // Pre-live only: mark the user's identity as verified
/// users.verify_prelive("buyer-42").await?;
///
/// let wallets = users.show_wallet_accounts("buyer-42").await?;
/// println!("{}", wallets.text().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum Users {}

impl ResourceKind for Users {
    const BASE_PATH: &'static str = "users";
}

impl Listable for Users {}
impl Showable for Users {}
impl Creatable for Users {}
impl Updatable for Users {}

impl Resource<Users> {
    /// Mark a user's identity as verified (pre-live environment only).
    pub async fn verify_prelive(&self, user_id: &str) -> Result<Response> {
        self.inner
            .patch(&self.sub_path(user_id, "identity_verified"), &serde_json::json!({}))
            .await
    }

    /// Get the wallet account of a user.
    pub async fn show_wallet_accounts(&self, user_id: &str) -> Result<Response> {
        self.inner.get(&self.sub_path(user_id, "wallet_accounts")).await
    }

    /// Get the bank account of a user.
    pub async fn show_bank_accounts(&self, user_id: &str) -> Result<Response> {
        self.inner.get(&self.sub_path(user_id, "bank_accounts")).await
    }

    /// Get the card accounts of a user.
    pub async fn show_card_accounts(&self, user_id: &str) -> Result<Response> {
        self.inner.get(&self.sub_path(user_id, "card_accounts")).await
    }

    /// List the items (transactions) a user takes part in.
    pub async fn show_items(&self, user_id: &str) -> Result<Response> {
        self.inner.get(&self.sub_path(user_id, "items")).await
    }
}
