//! Request dispatcher
//!
//! Every remote procedure call goes through [`ApiDispatcher::call`]:
//! 1. Obtain a valid bearer token (renewing if needed)
//! 2. Wrap method and params in a [`RequestEnvelope`] stamped with the
//!    current epoch-ms time
//! 3. POST it once to the chosen endpoint
//! 4. Fold whatever happens into an [`ApiResult`]
//!
//! `call` never returns an error and never panics. Local problems become
//! `999999`, non-200 responses become the stringified HTTP status, and a 200
//! response is returned exactly as the service sent it.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};
use yolink_common::observability::{ClientEvent, ClientObserver, TracingObserver};
use yolink_common::time::{Clock, SystemClock};
use yolink_domain::{ApiResult, Endpoints, RequestEnvelope, YoLinkError};

use super::auth::{AccessTokenProvider, TOKEN_UNAVAILABLE};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Target of a dispatched call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// Home/device API
    #[default]
    Api,
    /// Device-provisioning API
    Production,
    /// Arbitrary URL
    Custom(String),
}

impl Endpoint {
    /// Resolve to a URL against the configured endpoints
    pub fn url<'a>(&'a self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            Self::Api => &endpoints.api_url,
            Self::Production => &endpoints.production_url,
            Self::Custom(url) => url,
        }
    }
}

/// Authorized JSON-RPC dispatcher
pub struct ApiDispatcher {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    endpoints: Endpoints,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn ClientObserver>,
}

impl ApiDispatcher {
    /// Create a dispatcher using the system clock and the tracing observer
    pub fn new(
        http_client: HttpClient,
        auth: Arc<dyn AccessTokenProvider>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            http_client,
            auth,
            endpoints,
            clock: Arc::new(SystemClock),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the clock used to stamp envelopes
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ClientObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Issue one remote procedure call
    ///
    /// Empty or null `params` are omitted from the envelope.
    #[instrument(skip(self, params))]
    pub async fn call(&self, method: &str, params: Option<Value>, endpoint: Endpoint) -> ApiResult {
        let token = match self.auth.access_token().await {
            Ok(token) => token,
            Err(err) => {
                debug!(error = %err, "no valid token, request not sent");
                return self.failed(method, ApiResult::local_failure(TOKEN_UNAVAILABLE));
            }
        };

        let envelope = RequestEnvelope::new(method, self.clock.millis_since_epoch(), params);
        let url = endpoint.url(&self.endpoints);

        debug!(url = %url, "POST request");

        let request = self
            .http_client
            .request(Method::POST, url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .json(&envelope);

        let response = match self.http_client.send(request).await {
            Ok(response) => response,
            Err(err) => return self.failed(method, ApiResult::local_failure(err.to_string())),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return self.failed(method, ApiResult::http_status(status.as_u16()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let err = YoLinkError::from(InfraError::from(err));
                return self.failed(method, ApiResult::local_failure(err.to_string()));
            }
        };

        match serde_json::from_str::<ApiResult>(&body) {
            Ok(result) if !result.code.trim().is_empty() => {
                debug!(code = %result.code, "received API result");
                result
            }
            Ok(_) => {
                let desc = "Invalid response: empty result code";
                self.failed(method, ApiResult::local_failure(desc))
            }
            Err(err) => {
                let desc = format!("Invalid response body: {err}");
                self.failed(method, ApiResult::local_failure(desc))
            }
        }
    }

    fn failed(&self, method: &str, result: ApiResult) -> ApiResult {
        self.observer.on_event(&ClientEvent::CallFailed {
            method: method.to_string(),
            code: result.code.clone(),
            desc: result.desc.clone(),
        });
        result
    }
}

impl std::fmt::Debug for ApiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiDispatcher")
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.http_client.timeout())
            .finish_non_exhaustive()
    }
}
