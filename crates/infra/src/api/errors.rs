//! API-specific failure types
//!
//! Domain operations turn every non-success [`ApiResult`] into an
//! [`ApiFailure`]. The flat result code is kept as-is; [`FailureCategory`]
//! adds retry metadata for callers that wrap the client with their own retry
//! policy.

use thiserror::Error;
use yolink_domain::constants::{LOCAL_FAILURE_CODE, SUCCESS_CODE};
use yolink_domain::ApiResult;

/// Categories of API failures for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Local failure (`999999`): no token, transport error, unreadable body
    Transport,
    /// HTTP 5xx
    Server,
    /// HTTP 429
    RateLimit,
    /// HTTP 401/403
    Authentication,
    /// Any other HTTP status
    Client,
    /// Application error code returned by the service
    Remote,
}

impl FailureCategory {
    /// Classify a result code
    pub fn from_code(code: &str) -> Self {
        if code == LOCAL_FAILURE_CODE {
            return Self::Transport;
        }

        let http_status = (code.len() == 3)
            .then(|| code.parse::<u16>().ok())
            .flatten()
            .filter(|status| (100..=599).contains(status));

        match http_status {
            Some(401 | 403) => Self::Authentication,
            Some(429) => Self::RateLimit,
            Some(500..=599) => Self::Server,
            Some(_) => Self::Client,
            None => Self::Remote,
        }
    }

    /// Check if a failure in this category may succeed when retried
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transport | Self::Server | Self::RateLimit)
    }
}

/// Failed domain operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{desc} (code {code})")]
pub struct ApiFailure {
    pub code: String,
    pub desc: String,
}

impl ApiFailure {
    pub fn new(code: impl Into<String>, desc: impl Into<String>) -> Self {
        Self { code: code.into(), desc: desc.into() }
    }

    /// Local failure (`999999`) with the given description
    pub fn local(desc: impl Into<String>) -> Self {
        Self::new(LOCAL_FAILURE_CODE, desc)
    }

    /// Successful response whose `data` lacks a required field
    pub fn missing_field(field: &str) -> Self {
        Self::local(format!("Response data missing required field `{field}`"))
    }

    pub fn category(&self) -> FailureCategory {
        FailureCategory::from_code(&self.code)
    }

    /// Check if this failure should be retried
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

impl From<ApiResult> for ApiFailure {
    fn from(result: ApiResult) -> Self {
        // A success code reaching here means the payload was unusable
        if result.code == SUCCESS_CODE {
            return Self::local(result.desc);
        }
        Self { code: result.code, desc: result.desc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_categories() {
        assert_eq!(FailureCategory::from_code("999999"), FailureCategory::Transport);
        assert_eq!(FailureCategory::from_code("401"), FailureCategory::Authentication);
        assert_eq!(FailureCategory::from_code("403"), FailureCategory::Authentication);
        assert_eq!(FailureCategory::from_code("429"), FailureCategory::RateLimit);
        assert_eq!(FailureCategory::from_code("500"), FailureCategory::Server);
        assert_eq!(FailureCategory::from_code("503"), FailureCategory::Server);
        assert_eq!(FailureCategory::from_code("404"), FailureCategory::Client);
        assert_eq!(FailureCategory::from_code("000103"), FailureCategory::Remote);
        assert_eq!(FailureCategory::from_code("abc"), FailureCategory::Remote);
    }

    #[test]
    fn test_should_retry() {
        assert!(ApiFailure::local("timed out").is_retryable());
        assert!(ApiFailure::new("502", "HTTP 502 error").is_retryable());
        assert!(ApiFailure::new("429", "HTTP 429 error").is_retryable());
        assert!(!ApiFailure::new("401", "HTTP 401 error").is_retryable());
        assert!(!ApiFailure::new("400", "HTTP 400 error").is_retryable());
        assert!(!ApiFailure::new("020104", "Device busy").is_retryable());
    }

    #[test]
    fn converts_remote_result_verbatim() {
        let result = ApiResult { code: "010301".into(), desc: "Access denied".into(), data: None };
        let failure = ApiFailure::from(result);

        assert_eq!(failure.code, "010301");
        assert_eq!(failure.to_string(), "Access denied (code 010301)");
    }

    #[test]
    fn missing_field_is_local_failure() {
        let failure = ApiFailure::missing_field("deviceId");
        assert_eq!(failure.code, "999999");
        assert!(failure.desc.contains("deviceId"));
    }
}
