//! End-to-end tests for the relay happy paths.
//!
//! Uses the real router and middleware over a mock sink, so every assertion
//! covers the same code the production binary runs.

use axum_test::TestServer;
use chrono::{Duration, SecondsFormat, Utc};
use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};

#[tokio::test]
async fn test_batch_is_relayed() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(3).to_string().into())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["rows"], 3);

    assert_eq!(ctx.sink.batch_count(), 1);
    assert_eq!(ctx.sink.row_count(), 3);
}

#[tokio::test]
async fn test_oversized_batch_is_truncated_to_row_cap() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(150).to_string().into())
        .await;

    // Excess rows are dropped, not rejected
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rows"], 100);

    assert_eq!(ctx.sink.row_count(), 100);
    let batches = ctx.sink.batches();
    assert_eq!(batches[0].rows[0].event, "event_0");
    assert_eq!(batches[0].rows[99].event, "event_99");
}

#[tokio::test]
async fn test_stale_timestamp_is_replaced_before_relay() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let two_hours_ago = (Utc::now() - Duration::hours(2)).to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut row = fixtures::row("page_view");
    row["timestamp"] = json!(two_hours_ago);

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(json!({ "rows": [row] }).to_string().into())
        .await;

    response.assert_status_ok();
    let batches = ctx.sink.batches();
    let relayed = &batches[0].rows[0];
    assert_ne!(relayed.timestamp, two_hours_ago);
    // Replaced timestamp is (roughly) now
    let ts = chrono::DateTime::parse_from_rfc3339(&relayed.timestamp).unwrap();
    assert!((Utc::now() - ts.with_timezone(&Utc)).num_seconds().abs() < 60);
}

#[tokio::test]
async fn test_unknown_fields_are_stripped_before_relay() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let mut row = fixtures::row("page_view");
    row["rogue_field"] = json!("payload");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(json!({ "rows": [row] }).to_string().into())
        .await;

    response.assert_status_ok();
    let relayed = serde_json::to_value(&ctx.sink.batches()[0].rows[0]).unwrap();
    assert!(relayed.get("rogue_field").is_none());
}

#[tokio::test]
async fn test_unconfigured_sink_accepts_and_drops() {
    let ctx = TestContext::without_sink();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/track")
        .content_type("application/json")
        .bytes(fixtures::batch_body(2).to_string().into())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert!(body["note"]
        .as_str()
        .expect("drop ack carries a note")
        .contains("not configured"));

    // No outbound relay call occurred
    assert_eq!(ctx.sink.batch_count(), 0);
}

#[tokio::test]
async fn test_health_reports_sink_state() {
    let with_sink = TestContext::new();
    let server = TestServer::new(with_sink.router.clone()).expect("Failed to create test server");
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sink_configured"], true);

    let without = TestContext::without_sink();
    let server = TestServer::new(without.router.clone()).expect("Failed to create test server");
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["sink_configured"], false);
}
