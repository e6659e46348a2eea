//! Protocol constants
//!
//! Centralized location for the fixed values of the YoLink Open API V2.

// Result codes
pub const SUCCESS_CODE: &str = "000000";
/// Synthetic code for failures that never produced a remote answer.
pub const LOCAL_FAILURE_CODE: &str = "999999";

// Endpoints
pub const TOKEN_URL: &str = "https://api.yosmart.com/open/yolink/token";
pub const API_URL: &str = "https://api.yosmart.com/open/yolink/v2/api";
pub const PRODUCTION_URL: &str = "https://api.yosmart.com/open/production/v2/api";

// Token lifecycle
pub const DEFAULT_REFRESH_MARGIN_SECS: u64 = 300;

// Transport
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// Configuration sources
pub const ENV_UAID: &str = "YOSMART_UAID";
pub const ENV_SECRET: &str = "YOSMART_SECRET";

// Remote method names
pub const METHOD_HOME_GENERAL_INFO: &str = "Home.getGeneralInfo";
pub const METHOD_HOME_DEVICE_LIST: &str = "Home.getDeviceList";
pub const METHOD_HUB_GET_STATE: &str = "Hub.getState";
pub const METHOD_REQUEST_DEVICE_ID: &str = "requestDeviceId";
pub const METHOD_ACTIVATE_DEVICE_ID: &str = "activateDeviceId";
pub const METHOD_REQUEST_SN: &str = "requestSN";
pub const METHOD_BIND_SN: &str = "bindSN";
