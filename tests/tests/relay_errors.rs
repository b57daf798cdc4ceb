//! Tests for error handling at the relay.
//!
//! Verifies the status codes for malformed input, method misuse, size and
//! rate limits, and sink failures, and that no relay attempt happens on a
//! rejected request.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup, setup::TestContext};
use serde_json::{json, Value};

#[tokio::test]
async fn test_invalid_json_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes("not json at all".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
    assert_eq!(ctx.sink.batch_count(), 0);
}

#[tokio::test]
async fn test_truncated_json_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(r#"{"rows": [{"event": "#.into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_rows_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for body in [json!({}), json!({ "rows": {} }), json!({ "data": [] })] {
        let response = server
            .post("/track")
            .content_type("application/json")
            .bytes(body.to_string().into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "rows array required");
    }
}

#[tokio::test]
async fn test_empty_rows_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(json!({ "rows": [] }).to_string().into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.sink.batch_count(), 0);
}

#[tokio::test]
async fn test_non_post_method_returns_405() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/track").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_oversized_body_returns_400() {
    let mut config = setup::test_config();
    config.max_body_bytes = 256;
    let ctx = TestContext::with_config(config);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(10).to_string().into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("exceeds"));
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let mut config = setup::test_config();
    config.rate_limit.rate = 1;
    config.rate_limit.burst = 2;
    let ctx = TestContext::with_config(config);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..2 {
        server
            .post("/track")
            .content_type("application/json")
            .bytes(fixtures::batch_body(1).to_string().into())
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(1).to_string().into())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_sink_failure_returns_502_with_bounded_detail() {
    let ctx = TestContext::new();
    ctx.set_sink_failure(true);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(1).to_string().into())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "sink returned an error");
    assert_eq!(body["status"], 503);
    assert!(body["detail"].as_str().unwrap().len() <= 200);
}

#[tokio::test]
async fn test_client_can_resend_after_sink_recovers() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.set_sink_failure(true);
    server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(2).to_string().into())
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(ctx.sink.row_count(), 0);

    // The relay itself never retries; the client's next flush resends.
    ctx.set_sink_failure(false);
    server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(2).to_string().into())
        .await
        .assert_status_ok();
    assert_eq!(ctx.sink.row_count(), 2);
}
