//! Contract tests for `UserClient` against a mocked user service.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/user/info` | `get_user_info_*`, `fetch_identity_*` |
//! | POST   | `/user/` | `create_user_*` |
//! | PUT    | `/user/{id}` | `update_user_*` |

use std::time::Duration;

use idgate_core::{UserId, UserProfile};
use idgate_user_client::{
    CreateUserRequest, FailureKind, UpdateUserRequest, UserClient, UserServiceConfig,
    UserServiceError,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "Bearer abc123";

fn test_client(mock_server: &MockServer) -> UserClient {
    let config = UserServiceConfig::local_mock(&mock_server.uri(), "/user").unwrap();
    UserClient::new(config).unwrap()
}

fn alice_envelope() -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "msg": "ok",
        "data": {"user": {"id": 7, "name": "Alice", "sap_employee_id": 90017}}
    })
}

// ── GET /info ────────────────────────────────────────────────────────

#[tokio::test]
async fn get_user_info_forwards_header_and_returns_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .and(header("authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let info = client.get_user_info(TOKEN).await.unwrap();
    assert_eq!(info.user.id, UserId(7));
    assert_eq!(info.user.profile.name, "Alice");
    assert_eq!(info.user.profile.sap_employee_id, Some(90017));
}

#[tokio::test]
async fn fetch_identity_accepts_legacy_zero_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "msg": "",
            "data": {"user": {"id": 12, "name": "Carol", "org_name": "Ops", "unknown": [1, 2]}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let identity = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap();
    assert_eq!(identity.id(), UserId(12));
    assert_eq!(identity.name(), "Carol");
    assert_eq!(identity.user().profile.org_name, "Ops");
    assert_eq!(identity.sap_employee_id(), None);
}

#[tokio::test]
async fn fetch_identity_business_failure_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"code": 401, "msg": "expired"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Rejected);
    let rejection = err.rejection().unwrap();
    assert_eq!(rejection.code, 401);
    assert_eq!(rejection.msg, "expired");
}

#[tokio::test]
async fn fetch_identity_failure_with_irregular_data_is_still_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 403,
            "msg": "forbidden",
            "data": "not an object"
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Rejected);
    assert_eq!(err.rejection().unwrap().code, 403);
}

#[tokio::test]
async fn fetch_identity_non_2xx_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    match err {
        UserServiceError::ApiError { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_identity_malformed_body_is_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
    assert!(matches!(err, UserServiceError::Deserialization { .. }));
}

#[tokio::test]
async fn fetch_identity_empty_body_is_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
}

#[tokio::test]
async fn fetch_identity_wrong_payload_shape_is_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "msg": "ok",
            "data": {"user": {"id": "seven"}}
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
}

#[tokio::test]
async fn fetch_identity_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice_envelope())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = UserServiceConfig::local_mock(&mock_server.uri(), "/user").unwrap();
    config.timeout_secs = 1;
    let client = UserClient::new(config).unwrap();

    let err = client.fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(matches!(err, UserServiceError::Http { .. }));
}

#[tokio::test]
async fn fetch_identity_connection_refused_is_transport_failure() {
    // Bind and immediately release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = UserClient::new(UserServiceConfig {
        host: "127.0.0.1".into(),
        port,
        path: "/user".into(),
        timeout_secs: 5,
    })
    .unwrap();

    let err = client.fetch_identity(TOKEN).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn invalid_credential_never_reaches_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_envelope()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .fetch_identity("Bearer abc\r\n123")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Request);
}

// ── POST / ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_user_posts_flat_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/"))
        .and(header("authorization", TOKEN))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "name": "Bob",
            "login_name": "bob",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "msg": "created",
            "data": {"user": {"id": 31, "name": "Bob", "login_name": "bob"}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let req = CreateUserRequest {
        profile: UserProfile {
            name: "Bob".into(),
            login_name: "bob".into(),
            ..UserProfile::default()
        },
        password: "s3cret".into(),
    };
    let resp = test_client(&mock_server).create_user(TOKEN, &req).await.unwrap();
    assert_eq!(resp.user.id, UserId(31));
    assert_eq!(resp.user.profile.login_name, "bob");
}

#[tokio::test]
async fn create_user_relays_business_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 10010,
            "msg": "login name already exists"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .create_user(TOKEN, &CreateUserRequest::default())
        .await
        .unwrap_err();
    let rejection = err.rejection().unwrap();
    assert_eq!(rejection.code, 10010);
    assert_eq!(rejection.msg, "login name already exists");
}

// ── PUT /{id} ────────────────────────────────────────────────────────

#[tokio::test]
async fn update_user_puts_to_id_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/user/31"))
        .and(header("authorization", TOKEN))
        .and(body_partial_json(serde_json::json!({"name": "Robert"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "msg": "updated",
            "data": {"user": {"id": 31, "name": "Robert"}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let req = UpdateUserRequest {
        profile: UserProfile {
            name: "Robert".into(),
            ..UserProfile::default()
        },
    };
    let resp = test_client(&mock_server)
        .update_user(TOKEN, UserId(31), &req)
        .await
        .unwrap();
    assert_eq!(resp.user.profile.name, "Robert");
}
