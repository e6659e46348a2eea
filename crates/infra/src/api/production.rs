//! Device provisioning operations (production endpoint)

use serde_json::{json, Map, Value};
use yolink_domain::constants::{
    METHOD_ACTIVATE_DEVICE_ID, METHOD_BIND_SN, METHOD_REQUEST_DEVICE_ID, METHOD_REQUEST_SN,
};

use super::client::YoLinkClient;
use super::dispatcher::Endpoint;
use super::errors::ApiFailure;
use super::home::{string_field, string_list};

impl YoLinkClient {
    /// Allocate `size` device ids (`requestDeviceId`)
    pub async fn request_device_ids(&self, size: u32) -> Result<Vec<String>, ApiFailure> {
        let params = json!({ "size": size });
        let data = self
            .run("request_device_ids", METHOD_REQUEST_DEVICE_ID, Some(params), Endpoint::Production)
            .await?;
        Ok(string_list(data.as_ref(), "deviceIdList"))
    }

    /// Activate a device id for a chip (`activateDeviceId`)
    ///
    /// An empty `device_id` is treated as absent. Returns the activated
    /// device id.
    pub async fn activate_device_id(
        &self,
        chip_id: &str,
        app_eui: &str,
        device_id: Option<&str>,
    ) -> Result<String, ApiFailure> {
        const OP: &str = "activate_device_id";

        let mut params = Map::new();
        params.insert("chipId".into(), Value::from(chip_id));
        params.insert("appEui".into(), Value::from(app_eui));
        if let Some(device_id) = device_id.filter(|id| !id.is_empty()) {
            params.insert("deviceId".into(), Value::from(device_id));
        }

        let data = self
            .run(OP, METHOD_ACTIVATE_DEVICE_ID, Some(Value::Object(params)), Endpoint::Production)
            .await?;

        string_field(data.as_ref(), "deviceId")
            .ok_or_else(|| self.reject(OP, ApiFailure::missing_field("deviceId")))
    }

    /// Allocate `size` serial numbers (`requestSN`)
    pub async fn request_serial_numbers(&self, size: u32) -> Result<Vec<String>, ApiFailure> {
        let params = json!({ "size": size });
        let data = self
            .run("request_serial_numbers", METHOD_REQUEST_SN, Some(params), Endpoint::Production)
            .await?;
        Ok(string_list(data.as_ref(), "snList"))
    }

    /// Bind a serial number to a device (`bindSN`)
    ///
    /// Without `sn` (or with an empty one) the service picks one. Returns the
    /// bound serial number.
    pub async fn bind_serial_number(
        &self,
        device_id: &str,
        sn: Option<&str>,
    ) -> Result<String, ApiFailure> {
        const OP: &str = "bind_serial_number";

        let mut params = Map::new();
        params.insert("deviceId".into(), Value::from(device_id));
        if let Some(sn) = sn.filter(|sn| !sn.is_empty()) {
            params.insert("sn".into(), Value::from(sn));
        }

        let data =
            self.run(OP, METHOD_BIND_SN, Some(Value::Object(params)), Endpoint::Production).await?;

        string_field(data.as_ref(), "sn")
            .ok_or_else(|| self.reject(OP, ApiFailure::missing_field("sn")))
    }
}
