//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use yolink_common::auth::TokenClientError;
use yolink_domain::YoLinkError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub YoLinkError);

impl From<InfraError> for YoLinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<YoLinkError> for InfraError {
    fn from(value: YoLinkError) -> Self {
        InfraError(value)
    }
}

trait IntoYoLinkError {
    fn into_yolink(self) -> YoLinkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → YoLinkError */
/* -------------------------------------------------------------------------- */

impl IntoYoLinkError for HttpError {
    fn into_yolink(self) -> YoLinkError {
        if self.is_timeout() {
            return YoLinkError::Network(format!("http request timed out: {self}"));
        }

        if self.is_connect() {
            return YoLinkError::Network(format!("http connection failed: {self}"));
        }

        if self.is_builder() {
            return YoLinkError::Config(format!("invalid http request: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return YoLinkError::Network(format!("failed to read http response body: {self}"));
        }

        match self.status() {
            Some(status) => YoLinkError::Network(format!("http status {status}: {self}")),
            None => YoLinkError::Network(format!("http error: {self}")),
        }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_yolink())
    }
}

/* -------------------------------------------------------------------------- */
/* TokenClientError → YoLinkError */
/* -------------------------------------------------------------------------- */

impl IntoYoLinkError for TokenClientError {
    fn into_yolink(self) -> YoLinkError {
        match self {
            TokenClientError::RequestFailed(err) => err.into_yolink(),
            TokenClientError::ConfigError(msg) => YoLinkError::Config(msg),
            other => YoLinkError::Auth(other.to_string()),
        }
    }
}

impl From<TokenClientError> for InfraError {
    fn from(value: TokenClientError) -> Self {
        InfraError(value.into_yolink())
    }
}

/* -------------------------------------------------------------------------- */
/* Config parsing errors → YoLinkError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(YoLinkError::Config(format!("Invalid JSON format: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(YoLinkError::Config(format!("Invalid TOML format: {value}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(YoLinkError::Config(format!("Failed to read config file: {value}")))
    }
}
