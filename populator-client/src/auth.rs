//! Session login against the Ory Kratos public API.
//!
//! 1. `GET  <kratos>/self-service/login/api` → login flow id.
//! 2. `POST <kratos>/self-service/login?flow=<id>` with the password method.
//! 3. The response's `session_token` is sent as a bearer token on every
//!    GraphQL request.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::Credentials;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
struct LoginFlow {
    id: String,
}

#[derive(Debug, Deserialize)]
struct LoginSuccess {
    session_token: Option<String>,
}

/// Run the API login flow and return a session token.
pub async fn login(
    http: &Client,
    kratos_public_url: &str,
    credentials: &Credentials,
) -> ClientResult<String> {
    let base = kratos_public_url.trim_end_matches('/');

    let flow_url = format!("{base}/self-service/login/api");
    let response = http.get(&flow_url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Auth(format!(
            "could not start login flow ({status}): {body}"
        )));
    }
    let flow: LoginFlow = response.json().await?;
    debug!(flow = %flow.id, "obtained login flow");

    let submit_url = format!("{base}/self-service/login");
    let response = http
        .post(&submit_url)
        .query(&[("flow", flow.id.as_str())])
        .json(&json!({
            "method": "password",
            "identifier": credentials.email,
            "password": credentials.password,
        }))
        .send()
        .await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Auth(format!(
            "login rejected for {} ({status}): {body}",
            credentials.email
        )));
    }
    let success: LoginSuccess = response.json().await?;
    success
        .session_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ClientError::Auth("login response carried no session token".to_string()))
}
