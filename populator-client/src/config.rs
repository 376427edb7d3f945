//! Connection settings for [`GraphqlStore`](crate::GraphqlStore).

use std::fmt;
use std::time::Duration;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str =
    "http://localhost:3000/api/private/non-interactive/graphql";
pub const DEFAULT_KRATOS_PUBLIC_URL: &str = "http://localhost:3000/identity/ory/kratos/public/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Login credentials for the identity provider.
///
/// The [`Debug`] impl redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Already-resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub graphql_endpoint: String,
    pub kratos_public_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(graphql_endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            graphql_endpoint: graphql_endpoint.into(),
            kratos_public_url: DEFAULT_KRATOS_PUBLIC_URL.to_string(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_kratos_public_url(mut self, url: impl Into<String>) -> Self {
        self.kratos_public_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
