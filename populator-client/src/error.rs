//! Error types for populator-client.

use thiserror::Error;

/// Server error code for lookups of entities that do not exist.
pub const ENTITY_NOT_FOUND: &str = "ENTITY_NOT_FOUND";

pub type ClientResult<T> = Result<T, ClientError>;

/// All errors that can arise from remote store calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The server answered with a GraphQL `errors` array.
    ///
    /// Displays the first server-reported message.
    #[error("{}", first_message(.messages))]
    GraphQl {
        messages: Vec<String>,
        codes: Vec<String>,
    },

    /// Login flow failed or returned no session token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Response body was not the expected JSON shape.
    #[error("response JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the call depends on was null or absent in the response.
    #[error("missing `{0}` in response")]
    MissingData(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Whether the server reported that the looked-up entity does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::GraphQl { codes, .. } => codes.iter().any(|c| c == ENTITY_NOT_FOUND),
            _ => false,
        }
    }
}

fn first_message(messages: &[String]) -> &str {
    messages
        .first()
        .map(String::as_str)
        .unwrap_or("unknown GraphQL error")
}
