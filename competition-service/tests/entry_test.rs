//! Competition entry submission tests against an in-memory store.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

fn ada() -> Value {
    json!({
        "full_name": "Ada Lovelace",
        "email": "ada@example.com",
        "university": "Imperial",
        "consent_terms": true
    })
}

#[tokio::test]
async fn valid_entry_is_stored_and_counted() {
    // Arrange
    let app = TestApp::with_memory_store();
    assert_eq!(app.count().await, 0);

    // Act
    let (status, body) = app.post_json("/api/competition/entry", &ada()).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Entry received. Good luck!");
    let id = body["id"].as_str().expect("id should be a string");
    assert!(!id.is_empty());

    assert_eq!(app.count().await, 1);
    let records = app.store().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, id);
    assert_eq!(records[0].1.entry.full_name, "Ada Lovelace");
    assert!(!records[0].1.entry.marketing_opt_in);
}

#[tokio::test]
async fn optional_fields_are_persisted() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["course"] = json!("Analytical Engines");
    payload["year_of_study"] = json!("MSc");
    payload["marketing_opt_in"] = json!(true);
    payload["referral_code"] = json!("BABBAGE");

    let (status, _) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::OK);
    let entry = &app.store().records()[0].1.entry;
    assert_eq!(entry.course.as_deref(), Some("Analytical Engines"));
    assert_eq!(entry.year_of_study.as_deref(), Some("MSc"));
    assert!(entry.marketing_opt_in);
    assert_eq!(entry.referral_code.as_deref(), Some("BABBAGE"));
}

#[tokio::test]
async fn declined_terms_are_rejected_without_storing() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["consent_terms"] = json!(false);

    let (status, body) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["id"].is_null());
    assert_eq!(
        body["message"],
        "You must accept the terms and conditions to enter."
    );
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn invalid_email_is_rejected_without_storing() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["email"] = json!("not-an-email");

    let (status, body) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["field"], "email");
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn addresses_without_a_proper_shape_are_rejected() {
    let app = TestApp::with_memory_store();

    for email in ["ada..x@example.com", "ada@example", "ada@localhost"] {
        let mut payload = ada();
        payload["email"] = json!(email);

        let (status, body) = app.post_json("/api/competition/entry", &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", email);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["errors"],
            json!([{ "field": "email", "message": "must be a valid email address" }])
        );
    }

    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn form_style_booleans_are_accepted() {
    let app = TestApp::with_memory_store();

    for (consent, opt_in) in [(json!("true"), json!("no")), (json!(1), json!("on")), (json!("yes"), json!(0))] {
        let mut payload = ada();
        payload["consent_terms"] = consent.clone();
        payload["marketing_opt_in"] = opt_in;

        let (status, body) = app.post_json("/api/competition/entry", &payload).await;

        assert_eq!(status, StatusCode::OK, "consent_terms={}", consent);
        assert_eq!(body["success"], true);
    }

    let records = app.store().records();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|(_, record)| record.entry.consent_terms));
    assert!(!records[0].1.entry.marketing_opt_in);
    assert!(records[1].1.entry.marketing_opt_in);
}

#[tokio::test]
async fn form_style_false_still_declines_terms() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["consent_terms"] = json!("false");

    let (status, body) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You must accept the terms and conditions to enter."
    );
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn unrecognised_booleans_are_field_errors() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["consent_terms"] = json!("maybe");

    let (status, body) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([{ "field": "consent_terms", "message": "must be a boolean" }])
    );
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn each_missing_required_field_is_rejected() {
    let app = TestApp::with_memory_store();

    for field in ["full_name", "email", "university", "consent_terms"] {
        let mut payload = ada();
        payload.as_object_mut().unwrap().remove(field);

        let (status, body) = app.post_json("/api/competition/entry", &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["field"].as_str())
            .collect();
        assert_eq!(fields, vec![field]);
    }

    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn out_of_range_lengths_are_rejected() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["full_name"] = json!("A");
    payload["university"] = json!("u".repeat(151));
    payload["referral_code"] = json!("r".repeat(51));

    let (status, body) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("full_name"));
    assert!(message.contains("referral_code"));
    assert!(message.contains("university"));
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn wrong_field_types_are_rejected() {
    let app = TestApp::with_memory_store();
    let mut payload = ada();
    payload["full_name"] = json!(42);

    let (status, body) = app.post_json("/api/competition/entry", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::with_memory_store();

    let (status, body) = app
        .post_raw("/api/competition/entry", "{\"full_name\": ".to_string())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn repeated_submission_creates_two_records() {
    let app = TestApp::with_memory_store();

    let (_, first) = app.post_json("/api/competition/entry", &ada()).await;
    let (_, second) = app.post_json("/api/competition/entry", &ada()).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(app.count().await, 2);
}

#[tokio::test]
async fn storage_failure_returns_500() {
    let app = TestApp::with_memory_store();
    app.store().set_available(false);

    let (status, body) = app.post_json("/api/competition/entry", &ada()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["id"].is_null());
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to submit entry: "));

    app.store().set_available(true);
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn count_failure_returns_500() {
    let app = TestApp::with_memory_store();
    app.store().set_available(false);

    let (status, body) = app.get("/api/competition/entries/count").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch count: "));
}

#[tokio::test]
async fn submission_without_store_fails_loudly() {
    let app = TestApp::without_store();

    let (status, body) = app.post_json("/api/competition/entry", &ada()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(app.count().await, 0);
}
