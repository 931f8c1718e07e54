//! Basic usage example.
//!
//! This example authenticates against the Zai sandbox and looks up a user,
//! their wallet account, and a page of companies.
//!
//! Run with: cargo run --example basic_usage -- <user-id>

use zai_rs::{ClientCredentials, ListQuery, ZaiClient};

#[tokio::main]
async fn main() -> zai_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let client_id = std::env::var("ZAI_CLIENT_ID")
        .expect("ZAI_CLIENT_ID environment variable required");
    let client_secret = std::env::var("ZAI_CLIENT_SECRET")
        .expect("ZAI_CLIENT_SECRET environment variable required");
    let scope = std::env::var("ZAI_SCOPE")
        .expect("ZAI_SCOPE environment variable required");
    let user_id = std::env::args().nth(1).unwrap_or_else(|| "buyer-1".to_string());

    println!("Connecting to Zai sandbox...");

    let client = ZaiClient::new(ClientCredentials::new(client_id, client_secret, scope))?;

    // The first request triggers the token exchange
    let response = client.users().show(&user_id).await?;
    println!("GET users/{} -> {}", user_id, response.status());
    println!("{}", response.text().await?);
    println!("Re-authentications so far: {}", client.retry_count());

    let response = client.users().show_wallet_accounts(&user_id).await?;
    println!("\nWallet account -> {}", response.status());
    println!("{}", response.text().await?);

    let response = client
        .companies()
        .list(Some(&ListQuery::new().limit(5)))
        .await?;
    println!("\nCompanies -> {}", response.status());
    println!("{}", response.text().await?);

    Ok(())
}
