//! Integration tests for home, device and provisioning operations

use serde_json::json;
use wiremock::ResponseTemplate;
use yolink_infra::FailureCategory;

mod support;

use support::{body_of, mount_default_token, mount_rpc, ok, remote_error, TestClient};

/// Validates `get_home_info` is idempotent against unchanged remote state
/// and records the home id.
#[tokio::test]
async fn get_home_info_is_idempotent_and_records_home_id() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(
        &t.server,
        "/api",
        "Home.getGeneralInfo",
        ok(json!({"id": "home-42", "name": "Cabin"})),
        2,
    )
    .await;

    let first = t.client.get_home_info().await.expect("home info");
    let second = t.client.get_home_info().await.expect("home info");

    assert_eq!(first, second);
    assert_eq!(first.id, "home-42");
    assert_eq!(first.extra["name"], "Cabin");
    assert_eq!(t.client.home_id().as_deref(), Some("home-42"));
    assert_eq!(t.client.status().await.home_id.as_deref(), Some("home-42"));
}

#[tokio::test]
async fn get_home_info_without_id_is_local_failure() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/api", "Home.getGeneralInfo", ok(json!({})), 1).await;

    let failure = t.client.get_home_info().await.unwrap_err();

    assert_eq!(failure.code, "999999");
    assert!(failure.desc.contains("id"));
    assert!(t.client.home_id().is_none());
    assert!(t.observer.labels().contains(&"operation_failed"));
}

/// Validates `get_devices` parses the device list and records it.
#[tokio::test]
async fn get_devices_records_device_list() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(
        &t.server,
        "/api",
        "Home.getDeviceList",
        ok(json!({"devices": [
            {"deviceId": "d1", "name": "Front Door", "type": "DoorSensor", "token": "t1",
             "modelName": "YS7704-UC", "parentDeviceId": null},
            {"deviceId": "d2", "name": "Hub", "type": "Hub", "token": "t2"}
        ]})),
        1,
    )
    .await;

    let devices = t.client.get_devices().await.expect("devices");

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].device_type, "DoorSensor");
    assert_eq!(devices[0].model_name.as_deref(), Some("YS7704-UC"));
    assert_eq!(t.client.devices(), devices);
    assert_eq!(t.client.status().await.device_count, 2);
    assert!(t.observer.labels().contains(&"devices_listed"));
}

/// Validates that null strings and unreadable entries do not sink the list.
#[tokio::test]
async fn get_devices_tolerates_null_fields() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(
        &t.server,
        "/api",
        "Home.getDeviceList",
        ok(json!({"devices": [
            {"deviceId": "d1", "name": null, "type": "DoorSensor", "token": null},
            {"name": "no id"},
            {"deviceId": "d2", "name": "Hub", "type": "Hub", "token": "t2"}
        ]})),
        1,
    )
    .await;

    let devices = t.client.get_devices().await.expect("devices");

    let ids: Vec<_> = devices.iter().map(|d| d.device_id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d2"]);
    assert_eq!(devices[0].name, "");
    assert_eq!(devices[0].token, "");
}

#[tokio::test]
async fn get_devices_rejects_non_list() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/api", "Home.getDeviceList", ok(json!({"devices": "d1"})), 1).await;

    let failure = t.client.get_devices().await.unwrap_err();
    assert_eq!(failure.code, "999999");
    assert!(failure.desc.contains("Invalid device list"));
}

#[tokio::test]
async fn get_devices_without_list_is_empty() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/api", "Home.getDeviceList", ok(json!({})), 1).await;

    assert!(t.client.get_devices().await.expect("devices").is_empty());
}

#[tokio::test]
async fn get_device_state_targets_device() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/api", "Hub.getState", ok(json!({"online": true})), 1).await;

    let state = t.client.get_device_state("d1", "t1").await.expect("state");

    assert_eq!(state, json!({"online": true}));
    let request = &t.requests_to("/api").await[0];
    assert_eq!(
        body_of(request)["params"],
        json!({"targetDevice": {"deviceId": "d1", "token": "t1"}})
    );
}

/// Validates `control_device` merges caller params next to `targetDevice`.
#[tokio::test]
async fn control_device_merges_params() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    let response =
        ResponseTemplate::new(200).set_body_json(json!({"code": "000000", "desc": "Success"}));
    mount_rpc(&t.server, "/api", "Outlet.setState", response, 1).await;

    let data = t
        .client
        .control_device("d3", "t3", "Outlet.setState", Some(json!({"state": "open"})))
        .await
        .expect("control");

    assert!(data.is_null());
    let request = &t.requests_to("/api").await[0];
    assert_eq!(
        body_of(request)["params"],
        json!({"targetDevice": {"deviceId": "d3", "token": "t3"}, "state": "open"})
    );
}

#[tokio::test]
async fn control_device_rejects_non_object_params() {
    let t = TestClient::start().await;
    mount_rpc(&t.server, "/api", "Outlet.setState", ok(json!({})), 0).await;

    let failure = t
        .client
        .control_device("d3", "t3", "Outlet.setState", Some(json!(["open"])))
        .await
        .unwrap_err();

    assert_eq!(failure.code, "999999");
    assert!(t.server.received_requests().await.unwrap().is_empty());
}

/// Validates that a remote application error passes through as a
/// non-retryable failure.
#[tokio::test]
async fn remote_error_becomes_failure() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    let response = remote_error("000201", "Cannot connect to Device");
    mount_rpc(&t.server, "/api", "Hub.getState", response, 1).await;

    let failure = t.client.get_device_state("d1", "t1").await.unwrap_err();

    assert_eq!(failure.code, "000201");
    assert_eq!(failure.desc, "Cannot connect to Device");
    assert_eq!(failure.category(), FailureCategory::Remote);
    assert!(!failure.is_retryable());
}

#[tokio::test]
async fn rate_limited_call_is_retryable_failure() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/api", "Home.getDeviceList", ResponseTemplate::new(429), 1).await;

    let failure = t.client.get_devices().await.unwrap_err();

    assert_eq!(failure.category(), FailureCategory::RateLimit);
    assert!(failure.is_retryable());
}

#[tokio::test]
async fn request_device_ids_uses_production_endpoint() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(
        &t.server,
        "/production",
        "requestDeviceId",
        ok(json!({"deviceIdList": ["d-a", "d-b"]})),
        1,
    )
    .await;

    let ids = t.client.request_device_ids(2).await.expect("ids");

    assert_eq!(ids, vec!["d-a", "d-b"]);
    let request = &t.requests_to("/production").await[0];
    assert_eq!(body_of(request)["params"], json!({"size": 2}));
}

#[tokio::test]
async fn activate_device_id_returns_device_id() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/production", "activateDeviceId", ok(json!({"deviceId": "d-9"})), 1)
        .await;

    let id = t.client.activate_device_id("chip-1", "eui-1", None).await.expect("activate");

    assert_eq!(id, "d-9");
    let request = &t.requests_to("/production").await[0];
    assert_eq!(body_of(request)["params"], json!({"chipId": "chip-1", "appEui": "eui-1"}));
}

#[tokio::test]
async fn activate_device_id_without_device_id_in_data_fails() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/production", "activateDeviceId", ok(json!({})), 1).await;

    let failure = t.client.activate_device_id("chip-1", "eui-1", Some("d-9")).await.unwrap_err();

    assert_eq!(failure.code, "999999");
    assert!(failure.desc.contains("deviceId"));
    let failures = t.observer.failures();
    assert_eq!(failures.len(), 1);
}

#[tokio::test]
async fn request_serial_numbers_returns_list() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/production", "requestSN", ok(json!({"snList": ["SN1"]})), 1).await;

    assert_eq!(t.client.request_serial_numbers(1).await.expect("sn"), vec!["SN1"]);
}

#[tokio::test]
async fn bind_serial_number_sends_optional_sn() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/production", "bindSN", ok(json!({"sn": "SN7"})), 2).await;

    assert_eq!(t.client.bind_serial_number("d-1", None).await.expect("bind"), "SN7");
    assert_eq!(t.client.bind_serial_number("d-1", Some("SN7")).await.expect("bind"), "SN7");

    let requests = t.requests_to("/production").await;
    assert_eq!(body_of(&requests[0])["params"], json!({"deviceId": "d-1"}));
    assert_eq!(body_of(&requests[1])["params"], json!({"deviceId": "d-1", "sn": "SN7"}));
}

#[tokio::test]
async fn empty_optional_ids_are_omitted() {
    let t = TestClient::start().await;
    mount_default_token(&t.server).await;
    mount_rpc(&t.server, "/production", "bindSN", ok(json!({"sn": "SN8"})), 1).await;
    mount_rpc(&t.server, "/production", "activateDeviceId", ok(json!({"deviceId": "d-5"})), 1)
        .await;

    t.client.bind_serial_number("d-1", Some("")).await.expect("bind");
    t.client.activate_device_id("chip-1", "eui-1", Some("")).await.expect("activate");

    let requests = t.requests_to("/production").await;
    assert_eq!(body_of(&requests[0])["params"], json!({"deviceId": "d-1"}));
    assert_eq!(body_of(&requests[1])["params"], json!({"chipId": "chip-1", "appEui": "eui-1"}));
}
