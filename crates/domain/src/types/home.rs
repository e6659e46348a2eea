//! Home and device payloads
//!
//! Only the fields the client relies on are typed; everything else the
//! service returns is preserved in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `data` of a successful `Home.getGeneralInfo` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeInfo {
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `data.devices` from `Home.getDeviceList`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,

    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub name: String,

    #[serde(rename = "type", default, deserialize_with = "crate::types::null_as_default")]
    pub device_type: String,

    /// Per-device token required to address the device in RPC params
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `targetDevice` block embedded in device-scoped RPC params
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDevice {
    pub device_id: String,
    pub token: String,
}

impl TargetDevice {
    #[must_use]
    pub fn new(device_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self { device_id: device_id.into(), token: token.into() }
    }
}
