//! Client-credentials token exchange

use crate::crypto;
use crate::error::{self, Result, WingPayError};
use crate::types::{AccessTokenRequest, AccessTokenResponse};
use reqwest::Client;
use tracing::debug;

/// Token endpoint path
pub const ACCESS_TOKEN_PATH: &str = "/v1/oauth/access-token";

/// Exchanges client credentials for a short-lived bearer token.
///
/// One request, no retries, no caching; the caller decides reuse
/// policy.
#[derive(Debug, Clone)]
pub struct Authenticator {
    api_url: String,
    client: Client,
}

impl Authenticator {
    /// Create an authenticator against a gateway base URL, sharing the
    /// caller's HTTP client.
    pub fn new(api_url: impl Into<String>, client: Client) -> Self {
        Self {
            api_url: api_url.into(),
            client,
        }
    }

    /// Acquire a bearer token for the given credentials.
    ///
    /// The `authentication` header carries the digest of
    /// `clientId:clientSecret`; the response's `access_token` field is
    /// the token.
    pub async fn authenticate(&self, client_id: &str, client_secret: &str) -> Result<String> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(WingPayError::authentication(
                "clientId and clientSecret are required to acquire a token",
            ));
        }

        let authentication = crypto::digest(&format!("{}:{}", client_id, client_secret));
        let body = AccessTokenRequest {
            client_id,
            permission: "client_credentials",
        };

        let response = self
            .client
            .post(format!("{}{}", self.api_url, ACCESS_TOKEN_PATH))
            .header("authentication", authentication)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error::error_from_response(response).await);
        }

        let token: AccessTokenResponse = response.json().await?;
        if token.access_token.is_empty() {
            return Err(WingPayError::authentication(
                "token endpoint returned no access_token",
            ));
        }

        debug!("acquired access token");
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/oauth/access-token")
            // digest of "test-client:test-secret"
            .match_header("authentication", "x3AVFhzbMOY9QvnrdwXVLut95yQ=")
            .match_body(mockito::Matcher::Json(json!({
                "client_id": "test-client",
                "permission": "client_credentials"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"access_token": "tok-1", "expires_in": 3600}).to_string())
            .create_async()
            .await;

        let authenticator = Authenticator::new(server.url(), Client::new());
        let token = authenticator
            .authenticate("test-client", "test-secret")
            .await
            .unwrap();
        assert_eq!(token, "tok-1");
    }

    #[tokio::test]
    async fn test_authenticate_empty_credentials_fail_before_any_request() {
        let authenticator = Authenticator::new("http://127.0.0.1:1", Client::new());
        let err = authenticator.authenticate("", "secret").await.unwrap_err();
        assert!(matches!(err, WingPayError::Authentication { .. }));

        let err = authenticator.authenticate("id", "").await.unwrap_err();
        assert!(matches!(err, WingPayError::Authentication { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_normalizes_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/oauth/access-token")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "Invalid credentials"}).to_string())
            .create_async()
            .await;

        let authenticator = Authenticator::new(server.url(), Client::new());
        let err = authenticator
            .authenticate("test-client", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Remote error: Invalid credentials");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_empty_token() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/oauth/access-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"expires_in": 3600}).to_string())
            .create_async()
            .await;

        let authenticator = Authenticator::new(server.url(), Client::new());
        let err = authenticator
            .authenticate("test-client", "test-secret")
            .await
            .unwrap_err();
        assert!(matches!(err, WingPayError::Authentication { .. }));
    }
}
