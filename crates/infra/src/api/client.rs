//! YoLink client facade
//!
//! Wires credentials, the token lifecycle manager and the dispatcher
//! together, and keeps the last-known home id and device list.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use yolink_common::auth::{TokenClient, TokenGrantClient, TokenManager};
use yolink_common::observability::{ClientEvent, ClientObserver, TracingObserver};
use yolink_common::time::{Clock, SystemClock};
use yolink_domain::{ApiResult, ClientStatus, Device, Result};

use super::auth::AccessTokenProvider;
use super::dispatcher::{ApiDispatcher, Endpoint};
use super::errors::ApiFailure;
use crate::config::{self, ClientConfig};
use crate::errors::InfraError;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("yolink-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default)]
struct HomeSnapshot {
    home_id: Option<String>,
    devices: Vec<Device>,
}

/// Client for the YoLink Open API
pub struct YoLinkClient {
    tokens: Arc<TokenManager>,
    dispatcher: ApiDispatcher,
    observer: Arc<dyn ClientObserver>,
    snapshot: RwLock<HomeSnapshot>,
}

impl YoLinkClient {
    /// Create a client with default endpoints
    ///
    /// Explicit values override `YOSMART_UAID` / `YOSMART_SECRET`.
    ///
    /// # Errors
    /// Returns `YoLinkError::Config` if the credentials cannot be resolved.
    /// No network call is made.
    pub fn new(uaid: Option<&str>, secret_key: Option<&str>) -> Result<Self> {
        Self::from_config(config::load(uaid, secret_key)?)
    }

    /// Create a client from `YOSMART_UAID` / `YOSMART_SECRET`
    ///
    /// # Errors
    /// Returns `YoLinkError::Config` if either variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None)
    }

    /// Create a client from a resolved configuration
    ///
    /// # Errors
    /// Returns `YoLinkError::Config` if the credentials are missing or the
    /// HTTP clients cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder(config: ClientConfig) -> YoLinkClientBuilder {
        YoLinkClientBuilder::new(config)
    }

    /// Run the client-credentials grant now
    pub async fn authenticate(&self) -> bool {
        self.tokens.authenticate().await
    }

    /// Renew the access token now
    pub async fn refresh_token(&self) -> bool {
        self.tokens.refresh().await
    }

    /// Make sure a usable token is held, renewing if needed
    pub async fn ensure_valid_token(&self) -> bool {
        self.tokens.ensure_valid().await
    }

    /// Issue a raw remote procedure call
    pub async fn call(&self, method: &str, params: Option<Value>, endpoint: Endpoint) -> ApiResult {
        self.dispatcher.call(method, params, endpoint).await
    }

    /// Current client state
    ///
    /// Pure read: no renewal, no network call.
    pub async fn status(&self) -> ClientStatus {
        let tokens = self.tokens.snapshot().await;
        let now = self.tokens.now();
        let snapshot = self.snapshot.read();

        ClientStatus {
            authenticated: tokens.is_some(),
            token_valid: tokens.as_ref().is_some_and(|t| !t.is_expired(now)),
            token_expires_at: tokens.as_ref().map(|t| t.expires_at),
            home_id: snapshot.home_id.clone(),
            device_count: snapshot.devices.len(),
        }
    }

    /// Home id captured by the last successful [`YoLinkClient::get_home_info`]
    pub fn home_id(&self) -> Option<String> {
        self.snapshot.read().home_id.clone()
    }

    /// Devices captured by the last successful [`YoLinkClient::get_devices`]
    pub fn devices(&self) -> Vec<Device> {
        self.snapshot.read().devices.clone()
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn dispatcher(&self) -> &ApiDispatcher {
        &self.dispatcher
    }

    /// Dispatch and split into success data or a reported failure
    pub(crate) async fn run(
        &self,
        operation: &'static str,
        method: &str,
        params: Option<Value>,
        endpoint: Endpoint,
    ) -> std::result::Result<Option<Value>, ApiFailure> {
        let result = self.dispatcher.call(method, params, endpoint).await;
        if result.is_success() {
            Ok(result.data)
        } else {
            Err(self.reject(operation, ApiFailure::from(result)))
        }
    }

    /// Report a failed operation and hand the failure back
    pub(crate) fn reject(&self, operation: &'static str, failure: ApiFailure) -> ApiFailure {
        self.observer.on_event(&ClientEvent::OperationFailed {
            operation,
            code: failure.code.clone(),
            desc: failure.desc.clone(),
        });
        failure
    }

    pub(crate) fn record_home_id(&self, home_id: &str) {
        self.snapshot.write().home_id = Some(home_id.to_string());
        self.observer.on_event(&ClientEvent::HomeResolved { home_id: home_id.to_string() });
    }

    pub(crate) fn record_devices(&self, devices: &[Device]) {
        self.snapshot.write().devices = devices.to_vec();
        self.observer.on_event(&ClientEvent::DevicesListed { count: devices.len() });
    }
}

impl std::fmt::Debug for YoLinkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoLinkClient")
            .field("tokens", &self.tokens)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

/// Builder for [`YoLinkClient`]
///
/// Tests swap in a mock clock, a recording observer or a scripted token
/// endpoint here.
pub struct YoLinkClientBuilder {
    config: ClientConfig,
    clock: Option<Arc<dyn Clock>>,
    observer: Option<Arc<dyn ClientObserver>>,
    grant_client: Option<Arc<dyn TokenGrantClient>>,
    user_agent: Option<String>,
}

impl YoLinkClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, clock: None, observer: None, grant_client: None, user_agent: None }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ClientObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Use a custom token endpoint client instead of HTTP
    pub fn grant_client(mut self, grant_client: Arc<dyn TokenGrantClient>) -> Self {
        self.grant_client = Some(grant_client);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `YoLinkError::Config` if credentials are missing, the request
    /// timeout is zero, or an HTTP client cannot be created
    pub fn build(self) -> Result<YoLinkClient> {
        self.config.validate()?;
        let credentials = self.config.credentials()?;
        let timeout = self.config.request_timeout();

        let grant_client: Arc<dyn TokenGrantClient> = match self.grant_client {
            Some(client) => client,
            None => Arc::new(
                TokenClient::with_timeout(self.config.endpoints.token_url.clone(), timeout)
                    .map_err(InfraError::from)?,
            ),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let observer = self.observer.unwrap_or_else(|| Arc::new(TracingObserver));

        let tokens = Arc::new(
            TokenManager::new(credentials, grant_client)
                .with_clock(clock.clone())
                .with_observer(observer.clone())
                .with_auto_refresh(self.config.auto_refresh)
                .with_refresh_margin(self.config.refresh_margin()),
        );

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()))
            .build()?;

        let auth: Arc<dyn AccessTokenProvider> = tokens.clone();
        let dispatcher = ApiDispatcher::new(http_client, auth, self.config.endpoints.clone())
            .with_clock(clock)
            .with_observer(observer.clone());

        Ok(YoLinkClient {
            tokens,
            dispatcher,
            observer,
            snapshot: RwLock::new(HomeSnapshot::default()),
        })
    }
}
