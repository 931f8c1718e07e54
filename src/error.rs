//! Error types for the Zai API client.
//!
//! Only failures of the request pipeline itself are errors here. An HTTP
//! response with a non-success status (other than a 401 that exhausted the
//! retry budget) is returned to the caller as an ordinary response.

use thiserror::Error;

/// A specialized `Result` type for Zai operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Zai API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (DNS, connect, timeout, TLS) from the HTTP stack.
    ///
    /// The underlying `reqwest` error is passed through untouched.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization of a request body failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server kept answering 401 after the allowed number of
    /// re-authentication attempts.
    #[error("Too many retries (gave up after {retries} re-authentication attempts)")]
    TooManyRetries {
        /// Number of re-authentication retries that were spent
        retries: u32,
    },

    /// A call made with a deadline did not finish in time
    #[error("Request timeout")]
    Timeout,

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error came from the network layer.
    ///
    /// # Example
    ///
    /// ```
    /// use zai_rs::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_transport() {
    ///         println!("Network problem: {err}");
    ///     }
    /// }
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Returns `true` if the request or the call deadline timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::TooManyRetries { .. })
    }
}
