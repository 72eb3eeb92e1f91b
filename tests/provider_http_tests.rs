//! HTTP provider integration tests
//!
//! Exercises `HttpCatalogProvider` against a `wiremock` server: the
//! login handshake, bearer-authenticated search pages, cursor
//! propagation, and the error mapping for auth and provider failures.

use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sercat::config::ProviderConfig;
use sercat::credentials::Credentials;
use sercat::model::{Frequency, SeriesStatus};
use sercat::provider::{CatalogProvider, HttpCatalogProvider, SessionHandle};
use sercat::SercatError;

/// Construct a provider pointing at the given wiremock base URL.
fn make_provider(base_url: &str) -> HttpCatalogProvider {
    let config = ProviderConfig {
        api_base: base_url.to_string(),
        timeout_seconds: 5,
    };
    HttpCatalogProvider::new(&config).expect("provider creation should succeed")
}

fn creds() -> Credentials {
    Credentials::new("test-access", "test-secret")
}

#[tokio::test]
async fn test_login_success_returns_session_handle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(body_json(json!({
            "access_id": "test-access",
            "secret_key": "test-secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-123"})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let handle = provider.login(&creds()).await.expect("login should succeed");

    // The handle carries the token into subsequent requests
    Mock::given(method("GET"))
        .and(path("/series/search"))
        .and(bearer_token("tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0,
            "items": [],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = provider
        .fetch_page(&handle, "SRC_WB", None)
        .await
        .expect("fetch should succeed");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_login_rejected_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let err = provider.login(&creds()).await.expect_err("login should fail");

    match err.downcast_ref::<SercatError>() {
        Some(SercatError::Auth(msg)) => assert!(msg.contains("Invalid credentials")),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_server_error_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let err = provider.login(&creds()).await.expect_err("login should fail");
    assert!(err.downcast_ref::<SercatError>().is_some());
}

#[tokio::test]
async fn test_fetch_page_parses_records_and_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/search"))
        .and(query_param("source", "SRC_WB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "items": [
                {"metadata": {
                    "id": "s-1",
                    "name": "GDP Indonesia",
                    "status": {"name": "Active"},
                    "frequency": {"name": "Quarterly"},
                    "last_update_time": "2021-06-15T08:00:00Z"
                }},
                {"metadata": {"id": "s-2", "name": "CPI Indonesia"}}
            ],
            "next": "cursor-2"
        })))
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let handle = SessionHandle::from_token("tok");
    let page = provider
        .fetch_page(&handle, "SRC_WB", None)
        .await
        .expect("fetch should succeed");

    assert_eq!(page.total, 2);
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].id, "s-1");
    assert_eq!(page.records[0].status, SeriesStatus::Active);
    assert_eq!(page.records[0].frequency, Frequency::Quarterly);
    assert_eq!(page.records[1].status, SeriesStatus::Unknown);
    assert_eq!(page.next.as_deref(), Some("cursor-2"));
}

#[tokio::test]
async fn test_fetch_page_sends_cursor_untouched() {
    let server = MockServer::start().await;

    // The cursor is opaque; it must be echoed back verbatim
    Mock::given(method("GET"))
        .and(path("/series/search"))
        .and(query_param("source", "SRC_WB"))
        .and(query_param("cursor", "opaque%token=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "items": [{"metadata": {"id": "s-9"}}],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let handle = SessionHandle::from_token("tok");
    let page = provider
        .fetch_page(&handle, "SRC_WB", Some("opaque%token=1"))
        .await
        .expect("fetch should succeed");

    assert_eq!(page.records.len(), 1);
    assert!(page.next.is_none());
}

#[tokio::test]
async fn test_fetch_page_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let handle = SessionHandle::from_token("stale");
    let err = provider
        .fetch_page(&handle, "SRC_WB", None)
        .await
        .expect_err("fetch should fail");

    match err.downcast_ref::<SercatError>() {
        Some(SercatError::Auth(msg)) => assert!(msg.contains("Session expired")),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_page_server_error_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let handle = SessionHandle::from_token("tok");
    let err = provider
        .fetch_page(&handle, "SRC_WB", None)
        .await
        .expect_err("fetch should fail");

    match err.downcast_ref::<SercatError>() {
        Some(SercatError::Provider(msg)) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("upstream down"));
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_page_malformed_body_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let handle = SessionHandle::from_token("tok");
    let err = provider
        .fetch_page(&handle, "SRC_WB", None)
        .await
        .expect_err("fetch should fail");

    match err.downcast_ref::<SercatError>() {
        Some(SercatError::Provider(msg)) => assert!(msg.contains("parse")),
        other => panic!("expected provider error, got {:?}", other),
    }
}
