mod common;

use std::time::Duration;

use common::*;
use kalcium_client::{KalcClient, KalcError, SessionStatus};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

async fn mount_login_with_version(mock: &MockKalcServer, version: &str) {
    Mock::given(method("POST"))
        .and(path("/api/account/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Kalc-Version", version)
                .set_body_json(json!({ "token": TOKEN, "authenticationData": authentication_data() })),
        )
        .mount(&mock.server)
        .await;
}

#[tokio::test]
async fn server_message_is_surfaced() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(error_json(400, "Unknown filter"))
        .mount(&mock.server)
        .await;

    let request = kalcium_client::models::SearchRequest::in_termbase("ket", TERMBASE_ID, &[ENGLISH]);
    let err = client.search().search(&request).await.unwrap_err();
    assert!(matches!(err, KalcError::Api(_)));
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.to_string(), "API error [400] Unknown filter");
}

#[tokio::test]
async fn malformed_error_body_falls_back_to_reason() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;
    Mock::given(method("GET"))
        .and(path("/api/analysis-profiles/7"))
        .respond_with(versioned(
            ResponseTemplate::new(500).set_body_string("<html>boom</html>"),
        ))
        .mount(&mock.server)
        .await;

    let err = client
        .analysis_profiles()
        .get_analysis_profile(PROFILE_ID)
        .await
        .unwrap_err();
    let api = err.api_error().expect("api error");
    assert_eq!(api.status_code, 500);
    assert_eq!(api.message(), "Internal Server Error");
}

#[tokio::test]
async fn missing_resource_maps_to_not_found() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;
    Mock::given(method("DELETE"))
        .and(path("/api/terminology/termbases/1/entries/gone"))
        .respond_with(error_json(404, "Entry not found"))
        .mount(&mock.server)
        .await;

    let err = client
        .terminology()
        .delete_entry("gone", TERMBASE_ID)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    // A 404 does not touch the session.
    assert_eq!(client.session_status().await, SessionStatus::Authenticated);
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;
    Mock::given(method("GET"))
        .and(path("/api/terminology/termbases"))
        .respond_with(versioned(ResponseTemplate::new(200).set_body_string("not json")))
        .mount(&mock.server)
        .await;

    let err = client.terminology().get_termbases([1]).await.unwrap_err();
    assert!(matches!(err, KalcError::Decode(_)));
}

#[tokio::test]
async fn other_release_line_is_refused() {
    let mock = MockKalcServer::start().await;
    mount_login_with_version(&mock, "7.0.1").await;

    let err = mock.client().login("user", "secret").await.unwrap_err();
    match err {
        KalcError::IncompatibleVersion { server, supported } => {
            assert_eq!(server, "7.0.1");
            assert_eq!(supported, "6.3");
        }
        other => panic!("expected IncompatibleVersion, got {other:?}"),
    }
}

#[tokio::test]
async fn version_check_can_be_disabled() {
    let mock = MockKalcServer::start().await;
    mount_login_with_version(&mock, "7.0.1").await;

    let client = KalcClient::builder(mock.uri())
        .ignore_kalc_version(true)
        .build()
        .unwrap();
    client.login("user", "secret").await.unwrap();
    assert_eq!(client.session_status().await, SessionStatus::Authenticated);
}

#[tokio::test]
async fn missing_version_header_is_accepted() {
    let mock = MockKalcServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/account/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": TOKEN, "authenticationData": authentication_data() })),
        )
        .mount(&mock.server)
        .await;

    mock.client().login("user", "secret").await.unwrap();
}

#[tokio::test]
async fn client_announces_its_version() {
    let mock = MockKalcServer::start().await;
    mock.logged_in_client().await;

    let requests = mock.server.received_requests().await.unwrap();
    let announced = requests[0]
        .headers
        .get("X-Kalc-Client-Version")
        .and_then(|v| v.to_str().ok());
    assert_eq!(announced, Some("6.3"));
}

#[tokio::test]
async fn unreachable_server_is_a_connectivity_error() {
    // Grab a free port and close it again so nothing listens there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = KalcClient::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = client.login("user", "secret").await.unwrap_err();
    assert!(matches!(err, KalcError::Connectivity(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn invalid_backend_url_is_rejected() {
    let err = KalcClient::new("not a url").unwrap_err();
    assert!(matches!(err, KalcError::InvalidUrl(_)));
}

#[tokio::test]
async fn cancellation_aborts_a_request_in_flight() {
    let mock = MockKalcServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/account/login"))
        .respond_with(
            ok_json(json!({ "token": TOKEN, "authenticationData": authentication_data() }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock.server)
        .await;

    let cancel = CancellationToken::new();
    let client = mock.client().with_cancellation(cancel.clone());
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        }
    });

    let err = client.login("user", "secret").await.unwrap_err();
    assert!(matches!(err, KalcError::Cancelled));
    assert_eq!(client.session_status().await, SessionStatus::Unauthenticated);
}
