//! Client credentials for the client-credentials grant.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Client id, secret and scope exchanged for an access token.
///
/// Immutable once constructed. The secret is kept in a [`SecretString`] and
/// redacted from `Debug` output.
///
/// # Example
///
/// ```
/// use zai_rs::ClientCredentials;
///
/// let credentials = ClientCredentials::new("client-id", "client-secret", "scope");
/// assert_eq!(credentials.client_id(), "client-id");
/// assert!(!format!("{credentials:?}").contains("client-secret"));
/// ```
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: SecretString,
    scope: String,
}

impl ClientCredentials {
    /// Create credentials from their three parts.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            scope: scope.into(),
        }
    }

    /// The OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The requested scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Body of a client-credentials token request.
    pub(crate) fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            scope: &self.scope,
        }
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    scope: &'a str,
}
