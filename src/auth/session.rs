//! Access-token storage and the client-credentials token exchange.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use url::Url;

use super::ClientCredentials;
use crate::Result;

/// Authentication state of one client.
///
/// The session owns the client's single access-token slot. The slot starts
/// empty and is overwritten by every token exchange, including one that
/// yields no usable token. Tokens are never expired locally; a 401 from the
/// API is what triggers a refresh.
///
/// # Thread Safety
///
/// `Session` is cheap to clone and safe to share across tasks. Refresh is
/// single-flight: callers that were rejected with the same token wait for one
/// exchange instead of each issuing their own.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    http: reqwest::Client,
    credentials: ClientCredentials,
    token_endpoint: Url,
    state: RwLock<TokenState>,
    refresh_lock: Mutex<()>,
}

#[derive(Default)]
struct TokenState {
    access_token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
    // Bumped on every exchange so concurrent 401s can tell whether someone
    // else already refreshed.
    generation: u64,
}

/// The token a request was sent with.
pub(crate) struct TokenSnapshot {
    pub(crate) access_token: Option<SecretString>,
    pub(crate) generation: u64,
}

impl Session {
    pub(crate) fn new(
        http: reqwest::Client,
        credentials: ClientCredentials,
        token_endpoint: Url,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                http,
                credentials,
                token_endpoint,
                state: RwLock::new(TokenState::default()),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    /// Exchange the credentials for a new access token and store it.
    ///
    /// The stored token is replaced unconditionally. If the response carries
    /// no usable `access_token` the slot is cleared and subsequent requests
    /// go out unauthenticated.
    ///
    /// # Errors
    ///
    /// Only transport failures are errors. A non-success status from the
    /// token endpoint is not.
    pub async fn authenticate(&self) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;
        let token = self.fetch_access_token().await?;
        self.store(token).await;
        Ok(())
    }

    /// Refresh after a 401 on a request sent with `seen_generation`.
    ///
    /// Does nothing if another caller replaced the token in the meantime.
    pub(crate) async fn refresh(&self, seen_generation: u64) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;

        if self.inner.state.read().await.generation != seen_generation {
            tracing::debug!("access token already refreshed by a concurrent request");
            return Ok(());
        }

        let token = self.fetch_access_token().await?;
        self.store(token).await;
        Ok(())
    }

    /// Whether a non-empty access token is currently stored.
    pub async fn has_access_token(&self) -> bool {
        self.inner.state.read().await.access_token.is_some()
    }

    /// Expiry reported by the last token response, if it sent `expires_in`.
    ///
    /// Informational only; the client does not refresh ahead of it.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.state.read().await.expires_at
    }

    /// The credentials this session authenticates with.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.inner.credentials
    }

    /// The token endpoint this session authenticates against.
    pub fn token_endpoint(&self) -> &Url {
        &self.inner.token_endpoint
    }

    pub(crate) async fn snapshot(&self) -> TokenSnapshot {
        let state = self.inner.state.read().await;
        TokenSnapshot {
            access_token: state.access_token.clone(),
            generation: state.generation,
        }
    }

    // Private helper methods

    async fn fetch_access_token(&self) -> Result<TokenResponse> {
        tracing::debug!(
            endpoint = %self.inner.token_endpoint,
            client_id = self.inner.credentials.client_id(),
            "requesting access token"
        );

        let response = self
            .inner
            .http
            .post(self.inner.token_endpoint.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&self.inner.credentials.token_request())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(TokenResponse::parse(status, &body))
    }

    async fn store(&self, token: TokenResponse) {
        let mut state = self.inner.state.write().await;

        state.access_token = token.access_token.map(SecretString::from);
        state.expires_at = token
            .expires_in
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        state.generation += 1;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.inner.credentials)
            .field("token_endpoint", &self.inner.token_endpoint.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Default, PartialEq)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

impl TokenResponse {
    /// Lenient parse: anything without a non-empty string `access_token`
    /// yields an empty token rather than an error.
    fn parse(status: StatusCode, body: &[u8]) -> Self {
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token endpoint returned an error status");
        }

        let value: Value = serde_json::from_slice(body).unwrap_or_default();
        let access_token = value
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(String::from);

        if access_token.is_none() {
            tracing::warn!("token response did not contain an access token");
        }

        Self {
            access_token,
            expires_in: value.get("expires_in").and_then(Value::as_i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            reqwest::Client::new(),
            ClientCredentials::new("id", "super-secret-value", "scope"),
            Url::parse("https://auth.example.com/tokens").unwrap(),
        )
    }

    #[test]
    fn test_parse_token_response() {
        let body = br#"{"access_token":"abc","expires_in":3600,"token_type":"Bearer"}"#;
        let token = TokenResponse::parse(StatusCode::OK, body);

        assert_eq!(token.access_token.as_deref(), Some("abc"));
        assert_eq!(token.expires_in, Some(3600));
    }

    #[test]
    fn test_parse_missing_token_is_empty() {
        let token = TokenResponse::parse(StatusCode::OK, br#"{"token_type":"Bearer"}"#);
        assert_eq!(token, TokenResponse::default());
    }

    #[test]
    fn test_parse_malformed_body_is_empty() {
        let token = TokenResponse::parse(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(token.access_token, None);

        let token = TokenResponse::parse(StatusCode::OK, br#"{"access_token":42}"#);
        assert_eq!(token.access_token, None);

        let token = TokenResponse::parse(StatusCode::OK, br#"{"access_token":""}"#);
        assert_eq!(token.access_token, None);
    }

    #[tokio::test]
    async fn test_store_overwrites_and_bumps_generation() {
        let session = session();
        assert!(!session.has_access_token().await);
        assert_eq!(session.snapshot().await.generation, 0);

        session
            .store(TokenResponse {
                access_token: Some("first".into()),
                expires_in: Some(60),
            })
            .await;
        assert!(session.has_access_token().await);
        assert!(session.expires_at().await.is_some());
        assert_eq!(session.snapshot().await.generation, 1);

        // An empty exchange still replaces the stored token
        session.store(TokenResponse::default()).await;
        assert!(!session.has_access_token().await);
        assert!(session.expires_at().await.is_none());
        assert_eq!(session.snapshot().await.generation, 2);
    }

    #[tokio::test]
    async fn test_refresh_skips_when_generation_moved() {
        let session = session();
        session
            .store(TokenResponse {
                access_token: Some("fresh".into()),
                expires_in: None,
            })
            .await;

        // A request sent at generation 0 lost the race; no network call is made.
        session.refresh(0).await.unwrap();
        assert_eq!(session.snapshot().await.generation, 1);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let debug_str = format!("{:?}", session());

        assert!(!debug_str.contains("super-secret-value"));
        assert!(debug_str.contains("REDACTED"));
    }
}
