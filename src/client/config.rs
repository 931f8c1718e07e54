//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::Result;

/// Token endpoint of the Zai sandbox (pre-live) environment.
pub const SANDBOX_TOKEN_ENDPOINT: &str = "https://au-0000.sandbox.auth.assemblypay.com/tokens";

/// API base endpoint of the Zai sandbox (pre-live) environment.
pub const SANDBOX_API_ENDPOINT: &str = "https://test.api.promisepay.com/";

/// The pair of URLs a client talks to.
///
/// Defaults to the sandbox environment. Production endpoints are not built
/// in and must be supplied explicitly.
///
/// # Example
///
/// ```
/// use zai_rs::EndpointConfig;
///
/// let endpoints = EndpointConfig::new(
///     "https://auth.example.com/tokens",
///     "https://api.example.com/",
/// )?;
/// assert_eq!(endpoints.api_endpoint().as_str(), "https://api.example.com/");
/// # Ok::<(), zai_rs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    token_endpoint: Url,
    api_endpoint: Url,
}

impl EndpointConfig {
    /// Parse a token endpoint and an API base endpoint.
    ///
    /// Resource paths are appended to the API endpoint verbatim, so it
    /// should end with `/`. A bare host such as `https://api.example.com`
    /// is normalized to `https://api.example.com/` by URL parsing.
    pub fn new(token_endpoint: &str, api_endpoint: &str) -> Result<Self> {
        Ok(Self {
            token_endpoint: Url::parse(token_endpoint)?,
            api_endpoint: Url::parse(api_endpoint)?,
        })
    }

    /// The sandbox endpoints.
    pub fn sandbox() -> Self {
        // constants are valid URLs
        Self::new(SANDBOX_TOKEN_ENDPOINT, SANDBOX_API_ENDPOINT).unwrap()
    }

    /// URL credentials are exchanged at.
    pub fn token_endpoint(&self) -> &Url {
        &self.token_endpoint
    }

    /// Base URL resource paths are appended to.
    pub fn api_endpoint(&self) -> &Url {
        &self.api_endpoint
    }

    /// Resolve a relative resource path by plain concatenation.
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.api_endpoint.as_str(), path)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::sandbox()
    }
}

/// Configuration for the Zai client.
///
/// # Example
///
/// ```
/// use zai_rs::{ClientConfig, RetryConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0")
///     .with_retry(RetryConfig::default().with_max_retries(1));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Token and API endpoints
    pub endpoints: EndpointConfig,
    /// Default timeout for each HTTP request, token requests included
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Re-authentication retry policy
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            timeout: Duration::from_secs(30),
            user_agent: format!("zai-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoints.
    pub fn with_endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Lifetime of the re-authentication retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryScope {
    /// The budget is reset at the start of every top-level request.
    #[default]
    PerCall,
    /// One budget for the whole life of the client, never reset.
    ///
    /// Once `max_retries` re-authentications have happened, any later 401
    /// fails immediately with [`Error::TooManyRetries`](crate::Error), even
    /// hours later on a request that a fresh token would have fixed.
    PerClient,
}

/// Configuration for re-authentication after a 401 response.
///
/// `max_retries` is the number of times a 401 may trigger a token refresh
/// and resend. With the default of 3, a server that rejects every token
/// sees 4 API requests and 3 token requests before the call fails.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of re-authentication retries
    pub max_retries: u32,
    /// Whether the budget is per call or per client
    pub scope: RetryScope,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            scope: RetryScope::PerCall,
        }
    }
}

impl RetryConfig {
    /// A single budget shared by every call on the client.
    pub fn legacy() -> Self {
        Self {
            scope: RetryScope::PerClient,
            ..Default::default()
        }
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the budget scope.
    pub fn with_scope(mut self, scope: RetryScope) -> Self {
        self.scope = scope;
        self
    }
}
