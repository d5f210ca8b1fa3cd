//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, SecondsFormat, Utc};
use openid_cache::{
    api::create_router, cache::ManualClock, AppState, DiscoveryCache, NonceStore,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::default())
}

/// App whose stores share a hand-driven clock.
fn create_clocked_app(ttl_ms: i64) -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let state = AppState::new(
        DiscoveryCache::with_clock(Duration::milliseconds(ttl_ms), clock.clone()),
        NonceStore::with_clock(Duration::seconds(60), clock.clone()),
    );
    (create_router(state), clock)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

const FOO_RECORD: &str =
    r#"{"id":"foo.example","claimed_id":"c","op_endpoint":"a","op_local_id":"b"}"#;

// == Discovery Endpoint Tests ==

#[tokio::test]
async fn test_put_discovery_success() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/discovery", FOO_RECORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "http://foo.example/");
}

#[tokio::test]
async fn test_discovery_scenario_with_expiry() {
    let (app, clock) = create_clocked_app(50);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/discovery", FOO_RECORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Immediately readable
    let response = app
        .clone()
        .oneshot(get_request("/discovery/foo.example"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["claimed_id"], "http://c/");
    assert_eq!(json["op_endpoint"], "a");
    assert_eq!(json["op_local_id"], "b");

    // Unknown identifier
    let response = app
        .clone()
        .oneshot(get_request("/discovery/bar.example"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Expired after 75ms
    clock.advance(Duration::milliseconds(75));
    let response = app
        .clone()
        .oneshot(get_request("/discovery/foo.example"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["expired"], 1);
    assert_eq!(json["total_entries"], 0);
}

#[tokio::test]
async fn test_get_discovery_percent_encoded_url() {
    let app = create_test_app();

    let body = r#"{"id":"https://me.example/alice","claimed_id":"https://me.example/alice","op_endpoint":"https://op.example/"}"#;
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/discovery", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/discovery/https%3A%2F%2Fme.example%2Falice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "https://me.example/alice");
}

#[tokio::test]
async fn test_put_discovery_rejects_xri() {
    let app = create_test_app();

    let body = r#"{"id":"=alice","claimed_id":"c","op_endpoint":"a"}"#;
    let response = app
        .oneshot(json_request("PUT", "/discovery", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("XRI"));
}

#[tokio::test]
async fn test_put_discovery_missing_endpoint() {
    let app = create_test_app();

    let body = r#"{"id":"me.example","claimed_id":"c","op_endpoint":""}"#;
    let response = app
        .oneshot(json_request("PUT", "/discovery", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_discovery_malformed_json() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/discovery", "{not json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Verify Endpoint Tests ==

#[tokio::test]
async fn test_verify_match_mismatch_miss() {
    let (app, clock) = create_clocked_app(1_000);

    let body = r#"{"id":"https://me.example/","claimed_id":"https://me.example/","op_endpoint":"https://op.example/server"}"#;
    app.clone()
        .oneshot(json_request("PUT", "/discovery", body))
        .await
        .unwrap();

    let cases = [
        (r#"{"claimed_id":"https://me.example/","op_endpoint":"https://op.example/server"}"#, "match"),
        (r#"{"claimed_id":"https://me.example/","op_endpoint":"https://evil.example/"}"#, "mismatch"),
        (r#"{"claimed_id":"https://other.example/","op_endpoint":"https://op.example/server"}"#, "miss"),
    ];
    for (body, expected) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/discovery/verify", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["result"], expected, "request {body}");
    }

    clock.advance(Duration::milliseconds(1_001));
    let response = app
        .oneshot(json_request("POST", "/discovery/verify", cases[0].0))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"], "miss");
}

#[tokio::test]
async fn test_verify_claimed_id_without_trailing_slash() {
    let app = create_test_app();

    let body = r#"{"id":"https://me.example","claimed_id":"https://me.example","op_endpoint":"https://op.example/server"}"#;
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/discovery", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/discovery/https%3A%2F%2Fme.example"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["claimed_id"], "https://me.example/");

    let verify = r#"{"claimed_id":"https://me.example","op_endpoint":"https://op.example/server"}"#;
    let response = app
        .oneshot(json_request("POST", "/discovery/verify", verify))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"], "match");
}

// == Nonce Endpoint Tests ==

#[tokio::test]
async fn test_nonce_accept_then_replay() {
    let app = create_test_app();
    let nonce = format!("{}xyz", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    let body = format!(r#"{{"endpoint":"https://op.example/server","nonce":"{}"}}"#, nonce);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/nonce", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/nonce", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["nonces"], 1);
}

#[tokio::test]
async fn test_nonce_stale_and_invalid() {
    let app = create_test_app();

    let stale = r#"{"endpoint":"https://op.example/","nonce":"2001-01-01T00:00:00Zold"}"#;
    let response = app
        .clone()
        .oneshot(json_request("POST", "/nonce", stale))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let invalid = r#"{"endpoint":"https://op.example/","nonce":"garbage"}"#;
    let response = app
        .clone()
        .oneshot(json_request("POST", "/nonce", invalid))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Fresh timestamp, but longer than any nonce the store will keep
    let overlong = format!(
        "{}{}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "z".repeat(300)
    );
    let body = format!(r#"{{"endpoint":"https://op.example/","nonce":"{}"}}"#, overlong);
    let response = app
        .clone()
        .oneshot(json_request("POST", "/nonce", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["nonces"], 0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
