#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yolink_common::testing::RecordingObserver;
use yolink_common::time::MockClock;
use yolink_domain::Endpoints;
use yolink_infra::{ClientConfig, YoLinkClient};

/// Client wired to a local mock server with controllable time and a
/// recording observer.
pub struct TestClient {
    pub server: MockServer,
    pub client: YoLinkClient,
    pub clock: MockClock,
    pub observer: Arc<RecordingObserver>,
}

impl TestClient {
    /// Start a mock server and a client with default settings.
    pub async fn start() -> Self {
        Self::start_with(|config| config).await
    }

    /// Start a mock server and a client with adjusted settings.
    pub async fn start_with(configure: impl FnOnce(ClientConfig) -> ClientConfig) -> Self {
        let server = MockServer::start().await;
        let clock = MockClock::at_millis(1_735_689_600_000);
        let observer = Arc::new(RecordingObserver::new());

        let config = configure(
            ClientConfig::default()
                .with_credentials("ua_test", "sec_test")
                .with_endpoints(Endpoints::with_base_url(&server.uri())),
        );

        let client = YoLinkClient::builder(config)
            .clock(Arc::new(clock.clone()))
            .observer(observer.clone())
            .build()
            .expect("client should build");

        Self { server, client, clock, observer }
    }

    /// Requests received by the mock server whose path ends with `suffix`.
    pub async fn requests_to(&self, suffix: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().ends_with(suffix))
            .collect()
    }
}

/// Mount the client-credentials grant.
pub async fn mount_credentials_grant(server: &MockServer, body: Value, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

/// Mount a valid token that stays fresh for an hour.
pub async fn mount_default_token(server: &MockServer) {
    mount_credentials_grant(
        server,
        json!({"access_token": "tok1", "refresh_token": "r1", "expires_in": 3600}),
        1,
    )
    .await;
}

/// Mount an RPC handler on `/api` or `/production` keyed by envelope method.
pub async fn mount_rpc(
    server: &MockServer,
    endpoint_path: &str,
    rpc_method: &str,
    response: ResponseTemplate,
    expected: u64,
) {
    Mock::given(method("POST"))
        .and(path(endpoint_path))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

/// 200 response carrying a success result with `data`.
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": "000000",
        "time": 1_735_689_600_000_i64,
        "msgid": 1_735_689_600_000_i64,
        "desc": "Success",
        "data": data
    }))
}

/// 200 response carrying a remote application error.
pub fn remote_error(code: &str, desc: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": code, "desc": desc }))
}

/// JSON body of a received request.
pub fn body_of(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}
