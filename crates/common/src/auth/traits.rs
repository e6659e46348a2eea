//! Traits for token endpoint operations
//!
//! These traits enable dependency injection and testing by abstracting the
//! remote token endpoint.

use async_trait::async_trait;

use super::client::TokenClientError;
use super::types::{Credentials, TokenResponse};

/// Trait for the two grants the token lifecycle manager needs
///
/// Implementations perform exactly one exchange per call and never retry.
#[async_trait]
pub trait TokenGrantClient: Send + Sync {
    /// Exchange the client id and secret for a token
    /// (`grant_type=client_credentials`)
    ///
    /// # Errors
    /// Returns error if the request fails, the endpoint answers with a
    /// non-200 status, or the body cannot be parsed
    async fn client_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenResponse, TokenClientError>;

    /// Exchange a refresh token for a new access token
    /// (`grant_type=refresh_token`)
    ///
    /// # Errors
    /// Same conditions as [`TokenGrantClient::client_credentials`]
    async fn refresh(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse, TokenClientError>;
}
