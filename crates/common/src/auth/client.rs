//! Token endpoint client
//!
//! Performs the two form-encoded grants against the YoLink token endpoint:
//! - `client_credentials` (client id + secret)
//! - `refresh_token` (client id + refresh token)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::traits::TokenGrantClient;
use super::types::{Credentials, TokenResponse};

/// Timeout applied to every token request
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for token endpoint operations
#[derive(Debug)]
pub enum TokenClientError {
    /// HTTP request failed (connect, timeout, body read)
    RequestFailed(reqwest::Error),

    /// Endpoint answered with a non-200 status
    Rejected { status: u16 },

    /// Failed to parse response
    ParseError(String),

    /// Invalid configuration
    ConfigError(String),
}

impl std::fmt::Display for TokenClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "HTTP request failed: {e}"),
            Self::Rejected { status } => write!(f, "Token endpoint returned HTTP {status}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for TokenClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RequestFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TokenClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err)
    }
}

/// HTTP client for the YoLink token endpoint
#[derive(Debug, Clone)]
pub struct TokenClient {
    token_url: String,
    client: Client,
}

impl TokenClient {
    /// Create a token client for `token_url` with the default timeout
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(token_url: impl Into<String>) -> Result<Self, TokenClientError> {
        Self::with_timeout(token_url, TOKEN_REQUEST_TIMEOUT)
    }

    /// Create a token client with an explicit request timeout
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn with_timeout(
        token_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TokenClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| TokenClientError::ConfigError(format!("failed to build client: {e}")))?;

        Ok(Self { token_url: token_url.into(), client })
    }

    /// Get the configured token endpoint URL
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    async fn exchange(
        &self,
        grant_type: &str,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, TokenClientError> {
        debug!(url = %self.token_url, grant_type, "requesting token");

        let response = self.client.post(&self.token_url).form(form).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(url = %self.token_url, grant_type, %status, "token request rejected");
            return Err(TokenClientError::Rejected { status: status.as_u16() });
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| TokenClientError::ParseError(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(TokenClientError::ParseError("empty access_token".to_string()));
        }

        Ok(token)
    }
}

#[async_trait]
impl TokenGrantClient for TokenClient {
    async fn client_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenResponse, TokenClientError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id()),
            ("client_secret", credentials.client_secret()),
        ];
        self.exchange("client_credentials", &form).await
    }

    async fn refresh(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse, TokenClientError> {
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("refresh_token", refresh_token),
        ];
        self.exchange("refresh_token", &form).await
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::client.
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("ua_test", "sec_test")
    }

    #[tokio::test]
    async fn client_credentials_posts_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=ua_test"))
            .and(body_string_contains("client_secret=sec_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok1",
                "refresh_token": "r1",
                "expires_in": 7200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TokenClient::new(format!("{}/token", server.uri())).unwrap();
        let response = client.client_credentials(&credentials()).await.unwrap();

        assert_eq!(response.access_token, "tok1");
        assert_eq!(response.refresh_token.as_deref(), Some("r1"));
        assert_eq!(response.lifetime_secs(), 7200);
    }

    #[tokio::test]
    async fn refresh_sends_refresh_token_not_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=r1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TokenClient::new(format!("{}/token", server.uri())).unwrap();
        let response = client.refresh("ua_test", "r1").await.unwrap();
        assert_eq!(response.access_token, "tok2");

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("client_secret"));
    }

    #[tokio::test]
    async fn non_200_status_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let client = TokenClient::new(server.uri()).unwrap();
        let result = client.client_credentials(&credentials()).await;

        assert!(matches!(result, Err(TokenClientError::Rejected { status: 401 })));
    }

    #[tokio::test]
    async fn body_without_access_token_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": "010101", "desc": "x"})),
            )
            .mount(&server)
            .await;

        let client = TokenClient::new(server.uri()).unwrap();
        let result = client.client_credentials(&credentials()).await;

        assert!(matches!(result, Err(TokenClientError::ParseError(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TokenClient::new(format!("http://{addr}/token")).unwrap();
        let result = client.client_credentials(&credentials()).await;

        assert!(matches!(result, Err(TokenClientError::RequestFailed(_))));
    }

    #[test]
    fn display_never_mentions_secret() {
        let err = TokenClientError::Rejected { status: 403 };
        assert_eq!(err.to_string(), "Token endpoint returned HTTP 403");
    }
}
