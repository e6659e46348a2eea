//! RPC envelope and result types
//!
//! Every call to the YoLink API is a JSON `POST` of a [`RequestEnvelope`]
//! answered with an [`ApiResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{LOCAL_FAILURE_CODE, SUCCESS_CODE};

/// Outbound RPC body: `{method, time, params?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Remote operation name (e.g. `Home.getGeneralInfo`)
    pub method: String,

    /// Epoch milliseconds, sampled right before transmission
    pub time: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestEnvelope {
    /// Build an envelope stamped with `time_millis`.
    ///
    /// Empty parameter objects are dropped so the body matches what the
    /// service expects for parameterless methods.
    #[must_use]
    pub fn new(method: impl Into<String>, time_millis: i64, params: Option<Value>) -> Self {
        let params = params.filter(|value| match value {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        });

        Self { method: method.into(), time: time_millis, params }
    }
}

/// Uniform result of every dispatched call
///
/// `code == "000000"` means success. Any other code is a failure: either the
/// remote application's own error code, a stringified HTTP status, or
/// `"999999"` for local failures (no token, transport error, unreadable body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub code: String,

    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub desc: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResult {
    /// Synthetic failure for errors that never produced a remote answer.
    #[must_use]
    pub fn local_failure(desc: impl Into<String>) -> Self {
        Self { code: LOCAL_FAILURE_CODE.to_string(), desc: desc.into(), data: None }
    }

    /// Synthetic failure for a non-200 HTTP status. The body is not consulted.
    #[must_use]
    pub fn http_status(status: u16) -> Self {
        Self { code: status.to_string(), desc: format!("HTTP {status} error"), data: None }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    #[must_use]
    pub fn is_local_failure(&self) -> bool {
        self.code == LOCAL_FAILURE_CODE
    }
}
