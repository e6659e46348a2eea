//! Mock implementations of the auth and observability seams

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::auth::{Credentials, TokenClientError, TokenGrantClient, TokenResponse};
use crate::observability::{ClientEvent, ClientObserver};

type GrantResult = Result<TokenResponse, TokenClientError>;

/// Scripted token endpoint
///
/// Each grant pops the next queued result for its kind. With an empty queue
/// the client-credentials grant answers `mock_access_token` and the refresh
/// grant answers `refreshed_access_token`.
#[derive(Debug, Clone, Default)]
pub struct MockTokenClient {
    credentials_results: Arc<Mutex<VecDeque<GrantResult>>>,
    refresh_results: Arc<Mutex<VecDeque<GrantResult>>>,
    credentials_calls: Arc<Mutex<usize>>,
    refresh_calls: Arc<Mutex<usize>>,
    last_refresh_token: Arc<Mutex<Option<String>>>,
}

impl MockTokenClient {
    /// Create a mock token client with empty scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful client-credentials grant.
    pub fn push_credentials_ok(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_in: Option<i64>,
    ) {
        self.credentials_results.lock().push_back(Ok(response(
            access_token,
            refresh_token,
            expires_in,
        )));
    }

    /// Queue a client-credentials grant rejected with `status`.
    pub fn push_credentials_rejected(&self, status: u16) {
        self.credentials_results.lock().push_back(Err(TokenClientError::Rejected { status }));
    }

    /// Queue a successful refresh grant.
    pub fn push_refresh_ok(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_in: Option<i64>,
    ) {
        self.refresh_results.lock().push_back(Ok(response(
            access_token,
            refresh_token,
            expires_in,
        )));
    }

    /// Queue a refresh grant rejected with `status`.
    pub fn push_refresh_rejected(&self, status: u16) {
        self.refresh_results.lock().push_back(Err(TokenClientError::Rejected { status }));
    }

    #[must_use]
    pub fn credentials_calls(&self) -> usize {
        *self.credentials_calls.lock()
    }

    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        *self.refresh_calls.lock()
    }

    /// Calls across both grants
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.credentials_calls() + self.refresh_calls()
    }

    /// Refresh token presented by the most recent refresh grant
    #[must_use]
    pub fn last_refresh_token(&self) -> Option<String> {
        self.last_refresh_token.lock().clone()
    }
}

#[async_trait]
impl TokenGrantClient for MockTokenClient {
    async fn client_credentials(&self, _credentials: &Credentials) -> GrantResult {
        *self.credentials_calls.lock() += 1;
        self.credentials_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(response("mock_access_token", None, None)))
    }

    async fn refresh(&self, _client_id: &str, refresh_token: &str) -> GrantResult {
        *self.refresh_calls.lock() += 1;
        *self.last_refresh_token.lock() = Some(refresh_token.to_string());
        self.refresh_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(response("refreshed_access_token", None, None)))
    }
}

fn response(access_token: &str, refresh_token: Option<&str>, expires_in: Option<i64>) -> TokenResponse {
    TokenResponse {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_in,
    }
}

/// Observer that keeps every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first
    #[must_use]
    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.lock().clone()
    }

    /// Labels of the events received so far
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(ClientEvent::label).collect()
    }

    /// Only the failure events
    #[must_use]
    pub fn failures(&self) -> Vec<ClientEvent> {
        self.events.lock().iter().filter(|e| e.is_failure()).cloned().collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ClientObserver for RecordingObserver {
    fn on_event(&self, event: &ClientEvent) {
        self.events.lock().push(event.clone());
    }
}
