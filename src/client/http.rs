//! HTTP client implementation for the Zai API.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::api::{Companies, Resource, Users};
use crate::auth::{ClientCredentials, Session};
use crate::{Error, Result};

use super::config::{ClientConfig, RetryScope};

/// The main client for interacting with the Zai API.
///
/// Every request goes through one pipeline: the stored access token (if
/// any) is attached as a bearer token, and a 401 answer triggers a token
/// exchange and a resend, up to the configured retry ceiling. Any other
/// response, whatever its status, is handed back untouched.
///
/// # Example
///
/// ```no_run
/// use zai_rs::{ClientCredentials, ZaiClient};
///
/// # async fn example() -> zai_rs::Result<()> {
/// let client = ZaiClient::new(ClientCredentials::new("id", "secret", "scope"))?;
///
/// let response = client.users().show("42").await?;
/// if response.status().is_success() {
///     let user: serde_json::Value = response.json().await?;
///     println!("{user}");
/// }
///
/// // Raw access to any endpoint
/// let response = client.get("fees").await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ZaiClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
    // Lifetime count of 401-triggered retries; also the budget under
    // `RetryScope::PerClient`.
    retries: AtomicU32,
}

impl ZaiClient {
    /// Create a client against the sandbox endpoints with default settings.
    pub fn new(credentials: ClientCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(credentials: ClientCredentials, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let session = Session::new(
            http.clone(),
            credentials,
            config.endpoints.token_endpoint().clone(),
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
                retries: AtomicU32::new(0),
            }),
        })
    }

    /// Get the users resource.
    pub fn users(&self) -> Resource<Users> {
        Resource::new(self.inner.clone())
    }

    /// Get the companies resource.
    pub fn companies(&self) -> Resource<Companies> {
        Resource::new(self.inner.clone())
    }

    /// Fetch an access token now instead of waiting for the first 401.
    pub async fn authenticate(&self) -> Result<()> {
        self.inner.session.authenticate().await
    }

    /// Send an authorized request to an absolute URL.
    ///
    /// # Errors
    ///
    /// - [`Error::TooManyRetries`] if the server keeps answering 401
    /// - [`Error::Http`] on any transport failure, unretried
    /// - [`Error::Json`] if `body` cannot be serialized
    pub async fn execute<B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        self.inner.execute(method, url, body, None).await
    }

    /// Like [`execute`](Self::execute), with a deadline for the whole call.
    ///
    /// The deadline spans every attempt of the call, including any token
    /// exchanges a 401 triggers. When it elapses the call fails with
    /// [`Error::Timeout`]. [`ClientConfig::timeout`] still bounds each
    /// individual HTTP request.
    pub async fn execute_with_timeout<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        timeout: Duration,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        self.inner.execute(method, url, body, Some(timeout)).await
    }

    /// GET a path relative to the API endpoint.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.inner.get(path).await
    }

    /// DELETE a path relative to the API endpoint.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.inner.delete(path).await
    }

    /// POST a JSON body to a path relative to the API endpoint.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.inner.post(path, body).await
    }

    /// PATCH a JSON body to a path relative to the API endpoint.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.inner.patch(path, body).await
    }

    /// Number of 401-triggered retries over the life of this client.
    pub fn retry_count(&self) -> u32 {
        self.inner.retries.load(Ordering::SeqCst)
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        let url = self.config.endpoints.resolve(path);
        self.execute(Method::GET, &url, None, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.config.endpoints.resolve(path);
        self.execute(Method::DELETE, &url, None, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.config.endpoints.resolve(path);
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, &url, Some(body), None).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.config.endpoints.resolve(path);
        let body = serde_json::to_value(body)?;
        self.execute(Method::PATCH, &url, Some(body), None).await
    }

    /// Send a request, bounding the whole call by `timeout` when given.
    ///
    /// The deadline covers every API attempt and every token exchange the
    /// call triggers.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, self.send_with_reauth(method, url, body))
                .await
                .map_err(|_| {
                    tracing::warn!(url, ?limit, "call deadline elapsed");
                    Error::Timeout
                })?,
            None => self.send_with_reauth(method, url, body).await,
        }
    }

    /// Send a request, re-authenticating and resending on 401.
    async fn send_with_reauth(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Response> {
        let mut call_retries = 0;

        loop {
            let token = self.session.snapshot().await;
            let headers = build_headers(token.access_token.as_ref())?;

            tracing::debug!(
                %method,
                url,
                authorized = token.access_token.is_some(),
                "sending request"
            );

            let mut request = self.http.request(method.clone(), url).headers(headers);
            if let Some(ref body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            self.take_retry(&mut call_retries)?;
            tracing::debug!(%method, url, call_retries, "unauthorized; refreshing access token");
            self.session.refresh(token.generation).await?;
        }
    }

    /// Spend one unit of retry budget or fail with `TooManyRetries`.
    fn take_retry(&self, call_retries: &mut u32) -> Result<()> {
        let max_retries = self.config.retry.max_retries;

        let granted = match self.config.retry.scope {
            RetryScope::PerCall => {
                if *call_retries < max_retries {
                    self.retries.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                } else {
                    Err(*call_retries)
                }
            }
            RetryScope::PerClient => self
                .retries
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |spent| {
                    (spent < max_retries).then_some(spent + 1)
                })
                .map(|_| ()),
        };

        match granted {
            Ok(()) => {
                *call_retries += 1;
                Ok(())
            }
            Err(retries) => {
                tracing::warn!(retries, max_retries, "retry ceiling reached; giving up");
                Err(Error::TooManyRetries { retries })
            }
        }
    }
}

/// Build request headers, with a bearer token when one is stored.
fn build_headers(access_token: Option<&SecretString>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = access_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

impl std::fmt::Debug for ZaiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZaiClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}
