//! Access token seam between the dispatcher and the token lifecycle

use async_trait::async_trait;
use yolink_common::auth::TokenManager;
use yolink_domain::YoLinkError;

/// Description reported when no valid token can be obtained
pub const TOKEN_UNAVAILABLE: &str = "Failed to obtain valid token";

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token renewal if needed.
    async fn access_token(&self) -> Result<String, YoLinkError>;
}

#[async_trait]
impl AccessTokenProvider for TokenManager {
    async fn access_token(&self) -> Result<String, YoLinkError> {
        self.valid_access_token().await.ok_or_else(|| YoLinkError::Auth(TOKEN_UNAVAILABLE.into()))
    }
}
