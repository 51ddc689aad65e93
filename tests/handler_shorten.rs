mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;
use ttl_shortener::application::services::CreateEntry;
use ttl_shortener::domain::audit_event::{Level, Package};
use ttl_shortener::domain::repositories::EntryRepository;

fn expiry_of(json: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(json["expiry"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

fn code_of(json: &serde_json::Value) -> String {
    json["shortLink"]
        .as_str()
        .unwrap()
        .strip_prefix(&format!("{}/", common::BASE_URL))
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_shorten_with_defaults() {
    let (state, store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let before = Utc::now();
    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = code_of(&json);
    assert_eq!(code.len(), 6);
    assert!(store.has(&code));

    let minutes = (expiry_of(&json) - before).num_minutes();
    assert!((29..=30).contains(&minutes), "got {minutes} minutes");
}

#[tokio::test]
async fn test_shorten_with_requested_code_and_validity() {
    let (state, store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({
            "url": "https://example.com/docs",
            "validity": 45,
            "shortcode": "docs"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shortLink"], "http://sho.rt/docs");

    let entry = store.get("docs").unwrap();
    assert_eq!(entry.target_url, "https://example.com/docs");
    assert_eq!((entry.expires_at - entry.created_at).num_minutes(), 45);
}

#[tokio::test]
async fn test_shorten_validity_as_string() {
    let (state, store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/shorturls")
        .json(&json!({
            "url": "https://example.com",
            "validity": "10",
            "shortcode": "tenmin"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let entry = store.get("tenmin").unwrap();
    assert_eq!((entry.expires_at - entry.created_at).num_minutes(), 10);
}

#[tokio::test]
async fn test_taken_shortcode_is_replaced() {
    let (state, store, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let first = server
        .post("/shorturls")
        .json(&json!({ "url": "https://first.com", "shortcode": "abc123" }))
        .await;
    first.assert_status(StatusCode::CREATED);
    assert_eq!(first.json::<serde_json::Value>()["shortLink"], "http://sho.rt/abc123");

    let second = server
        .post("/shorturls")
        .json(&json!({ "url": "https://second.com", "shortcode": "abc123" }))
        .await;
    second.assert_status(StatusCode::CREATED);

    let code = code_of(&second.json::<serde_json::Value>());
    assert_ne!(code, "abc123");
    assert_eq!(store.get("abc123").unwrap().target_url, "https://first.com");
    assert_eq!(store.get(&code).unwrap().target_url, "https://second.com");

    let events = common::drain(&mut rx);
    assert!(events.iter().any(|e| e.message.contains("already exists")));
}

#[tokio::test]
async fn test_reserved_shortcode_is_replaced() {
    let (state, _store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": "health" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_ne!(code_of(&response.json::<serde_json::Value>()), "health");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "not-a-valid-url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_rejected_create_requests_are_audited() {
    let (state, _store, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "url": "not-a-valid-url" }))
        .await
        .assert_status_bad_request();

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": "forever" }))
        .await
        .assert_status_bad_request();

    let rejected: Vec<_> = common::drain(&mut rx)
        .into_iter()
        .filter(|e| e.level == Level::Error && e.package == Package::Handler)
        .collect();

    assert_eq!(rejected.len(), 2);
    assert!(rejected.iter().all(|e| e.message.starts_with("Invalid URL provided")));
}

#[tokio::test]
async fn test_shorten_invalid_shortcode() {
    let (state, _store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": "has space" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let (state, _store, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": "forever" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[test]
fn test_concurrent_requests_for_same_code_get_distinct_codes() {
    let (state, store, _rx) = common::create_test_state();

    let codes: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = state.shortening_service.clone();
                scope.spawn(move || {
                    service
                        .create(
                            CreateEntry::new(format!("https://example.com/{i}")).with_code("shared"),
                        )
                        .unwrap()
                        .code
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), 16);
    assert_eq!(codes.iter().filter(|c| *c == "shared").count(), 1);
    assert_eq!(store.len(), 16);
}
