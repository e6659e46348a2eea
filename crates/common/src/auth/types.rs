//! Credential and token types
//!
//! Defines the long-lived client credentials and the short-lived token set
//! obtained from the token endpoint.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Token lifetime assumed when the endpoint omits `expires_in`
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Client identifier/secret pair used for the client-credentials grant
///
/// Both values are immutable for the lifetime of the client. The secret is
/// held as a [`SecretString`] and is redacted from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    /// Create credentials from a client id (UAID) and secret key
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into().into_boxed_str()),
        }
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Expose the secret for the token request body.
    ///
    /// Callers must not log or persist the returned value.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Token endpoint response body
///
/// `access_token` is required; a 200 response without one is treated as a
/// parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Lifetime in seconds, defaulting to one hour
    #[must_use]
    pub fn lifetime_secs(&self) -> i64 {
        self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS).max(0)
    }
}

/// Access token, optional refresh token and absolute expiry
///
/// A `TokenSet` always carries both the access token and its expiry, so the
/// token state (`Option<TokenSet>`) can never hold one without the other.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Create a token set expiring `expires_in` seconds after `issued_at`
    ///
    /// Lifetimes beyond the representable range saturate at
    /// `DateTime::<Utc>::MAX_UTC`.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        issued_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Self {
        let expires_at = Duration::try_seconds(expires_in.max(0))
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { access_token, refresh_token, expires_at }
    }

    /// Build the token set for a successful grant.
    ///
    /// The response's refresh token wins; otherwise `previous_refresh` is
    /// carried over, since refresh tokens are not rotated unless the endpoint
    /// hands out a new one.
    #[must_use]
    pub fn issued(
        response: TokenResponse,
        previous_refresh: Option<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let lifetime = response.lifetime_secs();
        let refresh_token = response.refresh_token.filter(|t| !t.is_empty()).or(previous_refresh);
        Self::new(response.access_token, refresh_token, issued_at, lifetime)
    }

    /// Token is inside the renewal margin: `now > expires_at - margin`
    ///
    /// A margin reaching past the start of representable time always renews.
    #[must_use]
    pub fn needs_renewal(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at.checked_sub_signed(margin).map_or(true, |threshold| now > threshold)
    }

    /// Token has reached its expiry instant
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds until expiry (negative once expired)
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
