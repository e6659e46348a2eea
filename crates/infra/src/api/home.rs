//! Home and device operations

use serde_json::{json, Map, Value};
use tracing::warn;
use yolink_domain::constants::{
    METHOD_HOME_DEVICE_LIST, METHOD_HOME_GENERAL_INFO, METHOD_HUB_GET_STATE,
};
use yolink_domain::{Device, HomeInfo, TargetDevice};

use super::client::YoLinkClient;
use super::dispatcher::Endpoint;
use super::errors::ApiFailure;

impl YoLinkClient {
    /// Fetch general home information (`Home.getGeneralInfo`)
    ///
    /// Records the home id for [`YoLinkClient::status`].
    pub async fn get_home_info(&self) -> Result<HomeInfo, ApiFailure> {
        const OP: &str = "get_home_info";

        let data = self.run(OP, METHOD_HOME_GENERAL_INFO, None, Endpoint::Api).await?;
        let data = data.unwrap_or(Value::Null);

        if data.get("id").and_then(Value::as_str).is_none() {
            return Err(self.reject(OP, ApiFailure::missing_field("id")));
        }

        let home: HomeInfo = serde_json::from_value(data)
            .map_err(|e| self.reject(OP, ApiFailure::local(format!("Invalid home info: {e}"))))?;

        self.record_home_id(&home.id);
        Ok(home)
    }

    /// List the devices of the home (`Home.getDeviceList`)
    ///
    /// An absent `devices` field yields an empty list. Entries without a
    /// usable `deviceId` are skipped. The list is recorded for
    /// [`YoLinkClient::devices`].
    pub async fn get_devices(&self) -> Result<Vec<Device>, ApiFailure> {
        const OP: &str = "get_devices";

        let data = self.run(OP, METHOD_HOME_DEVICE_LIST, None, Endpoint::Api).await?;
        let devices = match data.and_then(|mut d| d.get_mut("devices").map(Value::take)) {
            Some(Value::Null) | None => Vec::new(),
            Some(Value::Array(entries)) => entries.into_iter().filter_map(parse_device).collect(),
            Some(other) => {
                let desc = format!("Invalid device list: expected an array, got {other}");
                return Err(self.reject(OP, ApiFailure::local(desc)));
            }
        };

        self.record_devices(&devices);
        Ok(devices)
    }

    /// Read a device's state (`Hub.getState`)
    pub async fn get_device_state(
        &self,
        device_id: &str,
        device_token: &str,
    ) -> Result<Value, ApiFailure> {
        let params = json!({ "targetDevice": TargetDevice::new(device_id, device_token) });
        let data =
            self.run("get_device_state", METHOD_HUB_GET_STATE, Some(params), Endpoint::Api).await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// Invoke an arbitrary device method
    ///
    /// `params` must be a JSON object (or absent); its keys are merged next to
    /// `targetDevice`, and a caller-supplied key wins on collision. Returns
    /// `Value::Null` when the service sends no `data`.
    pub async fn control_device(
        &self,
        device_id: &str,
        device_token: &str,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, ApiFailure> {
        const OP: &str = "control_device";

        let mut merged = Map::new();
        let target = serde_json::to_value(TargetDevice::new(device_id, device_token))
            .map_err(|e| self.reject(OP, ApiFailure::local(e.to_string())))?;
        merged.insert("targetDevice".to_string(), target);

        match params {
            None | Some(Value::Null) => {}
            Some(Value::Object(extra)) => merged.extend(extra),
            Some(_) => {
                return Err(self.reject(
                    OP,
                    ApiFailure::local("Device control params must be a JSON object"),
                ));
            }
        }

        let data = self.run(OP, method, Some(Value::Object(merged)), Endpoint::Api).await?;
        Ok(data.unwrap_or(Value::Null))
    }
}

fn parse_device(entry: Value) -> Option<Device> {
    serde_json::from_value(entry)
        .map_err(|e| warn!(error = %e, "skipping unreadable device entry"))
        .ok()
}

/// `data.<field>` as a string
pub(crate) fn string_field(data: Option<&Value>, field: &str) -> Option<String> {
    data.and_then(|d| d.get(field)).and_then(Value::as_str).map(str::to_string)
}

/// `data.<field>` as a list of strings; absent or non-list yields empty
pub(crate) fn string_list(data: Option<&Value>, field: &str) -> Vec<String> {
    data.and_then(|d| d.get(field))
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}
