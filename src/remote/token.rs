//! Session token acquisition
//!
//! The remote messaging endpoint is credentialed by an opaque session token
//! issued by a separate HTTP token endpoint. The relay fetches one token per
//! session and caches it in persisted session state, so the [`TokenProvider`]
//! seam is called at most once per session lifetime.

use reqwest::Client;
use serde::Deserialize;

use crate::core::{RelayError, RelayResult};

/// Seam for obtaining a session token for the remote messaging endpoint
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch a fresh session token.
    ///
    /// Any non-success status or malformed body is a fatal error for the
    /// turn being handled; the relay does not retry.
    async fn fetch_token(&self) -> RelayResult<String>;
}

/// Token endpoint response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// HTTP client for the token endpoint
///
/// Issues `GET <endpoint>?botId=<id>&tenantId=<id>` and extracts the `token`
/// field from the JSON body.
pub struct HttpTokenClient {
    client: Client,
    endpoint: String,
    bot_id: String,
    tenant_id: String,
}

impl HttpTokenClient {
    /// Create a token client for the given endpoint and channel identity
    pub fn new(
        endpoint: impl Into<String>,
        bot_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            bot_id: bot_id.into(),
            tenant_id: tenant_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl TokenProvider for HttpTokenClient {
    async fn fetch_token(&self) -> RelayResult<String> {
        tracing::debug!("[Token] Fetching session token from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("botId", &self.bot_id), ("tenantId", &self.tenant_id)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("[Token] Endpoint error: {} - {}", status, body);
            return Err(RelayError::TokenFetch(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::TokenFetch(format!("malformed body: {}", e)))?;

        tracing::debug!("[Token] Session token acquired");

        Ok(parsed.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parsing() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"token":"abc123","expires_in":1800}"#).unwrap();
        assert_eq!(parsed.token, "abc123");
    }

    #[test]
    fn test_token_response_missing_field() {
        let result: Result<TokenResponse, _> = serde_json::from_str(r#"{"expires_in":1800}"#);
        assert!(result.is_err());
    }
}
