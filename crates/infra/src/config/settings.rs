//! Client settings

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use yolink_common::auth::Credentials;
use yolink_domain::constants::{
    DEFAULT_REFRESH_MARGIN_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_SECRET, ENV_UAID,
};
use yolink_domain::{Endpoints, Result, YoLinkError};

/// Everything needed to construct a [`YoLinkClient`](crate::api::YoLinkClient)
///
/// File shape (JSON or TOML), all keys optional:
///
/// ```toml
/// uaid = "ua_..."
/// secret_key = "sec_v1_..."
/// auto_refresh = true
/// refresh_margin_secs = 300
/// request_timeout_secs = 10
///
/// [endpoints]
/// token_url = "https://api.yosmart.com/open/yolink/token"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// YoSmart User Access ID
    pub uaid: Option<String>,

    #[serde(deserialize_with = "deserialize_secret")]
    secret_key: Option<SecretString>,

    pub endpoints: Endpoints,

    /// Renew tokens before they expire
    pub auto_refresh: bool,

    pub refresh_margin_secs: u64,

    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uaid: None,
            secret_key: None,
            endpoints: Endpoints::default(),
            auto_refresh: true,
            refresh_margin_secs: DEFAULT_REFRESH_MARGIN_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Set both credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        uaid: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.uaid = Some(uaid.into());
        self.secret_key = Some(SecretString::new(secret_key.into().into_boxed_str()));
        self
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    #[must_use]
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin_secs = margin.as_secs();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    pub fn refresh_margin(&self) -> Duration {
        Duration::from_secs(self.refresh_margin_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether a non-empty secret key is configured
    pub fn has_secret_key(&self) -> bool {
        self.secret_key.as_ref().is_some_and(|s| !s.expose_secret().trim().is_empty())
    }

    pub(crate) fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_ref().map(|s| s.expose_secret())
    }

    pub(crate) fn set_secret_key(&mut self, secret_key: Option<String>) {
        self.secret_key = secret_key.map(|value| SecretString::new(value.into_boxed_str()));
    }

    /// Check everything needed to build a client
    ///
    /// # Errors
    /// Returns `YoLinkError::Config` when the credentials are missing or the
    /// request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(YoLinkError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.credentials().map(|_| ())
    }

    /// Validated credentials
    ///
    /// Blank values count as missing. Non-blank values are passed through
    /// untrimmed.
    ///
    /// # Errors
    /// Returns `YoLinkError::Config` naming the missing value(s) when the
    /// UAID or secret key is absent or blank.
    pub fn credentials(&self) -> Result<Credentials> {
        let uaid = self.uaid.as_deref().filter(|v| !v.trim().is_empty());
        let secret = self.secret_key().filter(|v| !v.trim().is_empty());

        match (uaid, secret) {
            (Some(uaid), Some(secret)) => Ok(Credentials::new(uaid, secret)),
            (None, None) => Err(YoLinkError::Config(format!(
                "UAID and secret key are required (set {ENV_UAID} and {ENV_SECRET} or pass them explicitly)"
            ))),
            (None, Some(_)) => Err(YoLinkError::Config(format!(
                "UAID is required (set {ENV_UAID} or pass it explicitly)"
            ))),
            (Some(_), None) => Err(YoLinkError::Config(format!(
                "secret key is required (set {ENV_SECRET} or pass it explicitly)"
            ))),
        }
    }
}

fn deserialize_secret<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|value| SecretString::new(value.into_boxed_str())))
}
