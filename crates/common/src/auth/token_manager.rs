//! Token lifecycle manager
//!
//! Guarantees that a caller asking for a valid token either gets one or is
//! told that authentication is impossible right now:
//! - No token yet → client-credentials grant
//! - Token inside the renewal margin (default 5 min) → refresh grant, or a
//!   full re-authentication when no refresh token is held
//! - Otherwise → token is used as-is, no network call
//!
//! Renewal is lazy: it happens on the next request that needs the token,
//! never on a background timer. The whole check-and-renew sequence runs
//! under one lock, so concurrent callers serialize around renewal and never
//! see a half-written token.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::traits::TokenGrantClient;
use super::types::{Credentials, TokenSet};
use crate::observability::{ClientEvent, ClientObserver, TracingObserver};
use crate::time::{Clock, SystemClock};

/// Default renewal margin before expiry
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Token manager with lazy renewal
///
/// Grant failures are reported to the observer and surface as `false` /
/// `None`; nothing is retried internally.
pub struct TokenManager {
    credentials: Credentials,
    grant_client: Arc<dyn TokenGrantClient>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn ClientObserver>,
    state: Mutex<Option<TokenSet>>,
    auto_refresh: bool,
    refresh_margin: chrono::Duration,
}

impl TokenManager {
    /// Create a token manager with the system clock, tracing observer,
    /// auto-refresh enabled and a 5 minute renewal margin
    #[must_use]
    pub fn new(credentials: Credentials, grant_client: Arc<dyn TokenGrantClient>) -> Self {
        Self {
            credentials,
            grant_client,
            clock: Arc::new(SystemClock),
            observer: Arc::new(TracingObserver),
            state: Mutex::new(None),
            auto_refresh: true,
            refresh_margin: to_chrono(DEFAULT_REFRESH_MARGIN),
        }
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the event sink
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ClientObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Enable or disable renewal before expiry
    #[must_use]
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    /// Renew tokens this long before expiry
    #[must_use]
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = to_chrono(margin);
        self
    }

    /// Seed the token state, replacing whatever is held
    #[must_use]
    pub fn with_tokens(self, tokens: TokenSet) -> Self {
        Self { state: Mutex::new(Some(tokens)), ..self }
    }

    /// Run the client-credentials grant and replace the token state
    ///
    /// Returns `false` on rejection, transport failure or an unparseable
    /// response; the held state is left untouched in that case.
    pub async fn authenticate(&self) -> bool {
        let mut state = self.state.lock().await;
        self.authenticate_locked(&mut state).await
    }

    /// Renew the access token
    ///
    /// Uses the refresh grant when a refresh token is held, otherwise falls
    /// back to [`TokenManager::authenticate`].
    pub async fn refresh(&self) -> bool {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state).await
    }

    /// Policy gate run before every dispatched call
    ///
    /// Returns `false` when no usable token could be established; the caller
    /// must not send the dependent request.
    pub async fn ensure_valid(&self) -> bool {
        let mut state = self.state.lock().await;
        self.ensure_valid_locked(&mut state).await
    }

    /// Validate (renewing if needed) and return the bearer token in one step
    ///
    /// The token returned is the one validated under the same lock, so a
    /// concurrent renewal cannot swap it out in between.
    pub async fn valid_access_token(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        if !self.ensure_valid_locked(&mut state).await {
            return None;
        }
        state.as_ref().map(|tokens| tokens.access_token.clone())
    }

    /// Current token state (without renewal)
    pub async fn snapshot(&self) -> Option<TokenSet> {
        self.state.lock().await.clone()
    }

    /// Check if an access token is held
    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.is_some()
    }

    /// Seconds until the held token expires, or None if not authenticated
    pub async fn seconds_until_expiry(&self) -> Option<i64> {
        let now = self.clock.now();
        self.state.lock().await.as_ref().map(|tokens| tokens.seconds_until_expiry(now))
    }

    /// Drop the held tokens
    pub async fn clear(&self) {
        *self.state.lock().await = None;
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Get the renewal margin
    #[must_use]
    pub fn refresh_margin(&self) -> Duration {
        self.refresh_margin.to_std().unwrap_or_default()
    }

    /// Current time according to the injected clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn authenticate_locked(&self, state: &mut Option<TokenSet>) -> bool {
        match self.grant_client.client_credentials(&self.credentials).await {
            Ok(response) => {
                let tokens = TokenSet::issued(response, None, self.clock.now());
                let expires_at = tokens.expires_at;
                *state = Some(tokens);
                self.observer.on_event(&ClientEvent::Authenticated { expires_at });
                true
            }
            Err(err) => {
                self.observer
                    .on_event(&ClientEvent::AuthenticationFailed { reason: err.to_string() });
                false
            }
        }
    }

    async fn refresh_locked(&self, state: &mut Option<TokenSet>) -> bool {
        let Some(refresh_token) = state.as_ref().and_then(|t| t.refresh_token.clone()) else {
            self.observer.on_event(&ClientEvent::RefreshUnavailable);
            return self.authenticate_locked(state).await;
        };

        match self.grant_client.refresh(self.credentials.client_id(), &refresh_token).await {
            Ok(response) => {
                let tokens = TokenSet::issued(response, Some(refresh_token), self.clock.now());
                let expires_at = tokens.expires_at;
                *state = Some(tokens);
                self.observer.on_event(&ClientEvent::Refreshed { expires_at });
                true
            }
            Err(err) => {
                self.observer.on_event(&ClientEvent::RefreshFailed { reason: err.to_string() });
                false
            }
        }
    }

    async fn ensure_valid_locked(&self, state: &mut Option<TokenSet>) -> bool {
        if state.is_none() {
            return self.authenticate_locked(state).await;
        }

        let now = self.clock.now();
        let expires_at = match state.as_ref() {
            Some(tokens) if self.auto_refresh && tokens.needs_renewal(now, self.refresh_margin) => {
                tokens.expires_at
            }
            _ => return true,
        };

        self.observer.on_event(&ClientEvent::RenewalTriggered { expires_at });
        self.refresh_locked(state).await
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("auto_refresh", &self.auto_refresh)
            .field("refresh_margin", &self.refresh_margin)
            .finish_non_exhaustive()
    }
}

/// Margins too large for chrono saturate rather than collapsing to zero.
fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
}
