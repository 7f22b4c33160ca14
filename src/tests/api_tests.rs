use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use super::create_test_service;
use crate::api;

fn app() -> Router {
    api::router(Arc::new(create_test_service()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_ledger(app: &Router) -> String {
    let (status, ledger) = send(
        app,
        "POST",
        "/api/ledgers",
        Some(json!({ "name": "Trip", "currency": "EUR", "owner_id": "owner", "owner_name": "Owner" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let ledger_id = ledger["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        app,
        "POST",
        &format!("/api/ledgers/{}/participants", ledger_id),
        Some(json!({ "participant_id": "alice", "name": "Alice", "added_by_id": "owner" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    ledger_id
}

#[tokio::test]
async fn test_ledger_flow_over_http() {
    let _ = env_logger::try_init();
    let app = app();
    let ledger_id = create_ledger(&app).await;

    let (status, entry) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/entries", ledger_id),
        Some(json!({
            "amount": 100.0,
            "payer_id": "owner",
            "date": "2024-06-01",
            "memo": "Dinner",
            "split": [
                { "participant_id": "owner", "amount": 50.0 },
                { "participant_id": "alice", "amount": 50.0 }
            ],
            "actor_id": "owner"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["payer_id"], "owner");

    let (status, balances) = send(&app, "GET", &format!("/api/ledgers/{}/balances/owner", ledger_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balances["owed_to_viewer"][0]["participant_id"], "alice");
    assert_eq!(balances["owed_to_viewer"][0]["amount"], 50.0);

    let (status, snapshot) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/snapshot", ledger_id),
        Some(json!({ "mode": "casual", "requested_by_id": "owner" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let anchor = snapshot["anchor_message"].as_str().unwrap().to_string();
    assert!(anchor.starts_with("potledger:v1:"));

    let (status, verified) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/anchor/verify", ledger_id),
        Some(json!({ "message": anchor })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["matches"], true);

    let (status, audits) = send(&app, "GET", &format!("/api/ledgers/{}/audits", ledger_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audits.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_errors_map_to_status_codes() {
    let _ = env_logger::try_init();
    let app = app();

    let (status, body) = send(&app, "GET", "/api/ledgers/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ledger missing not found");

    let ledger_id = create_ledger(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/entries", ledger_id),
        Some(json!({
            "amount": 100.0,
            "payer_id": "owner",
            "date": "2024-06-01",
            "split": [{ "participant_id": "alice", "amount": 10.0 }],
            "actor_id": "owner"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed split"));

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/checkpoint", ledger_id),
        Some(json!({ "actor_id": "owner" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/settlements", ledger_id),
        Some(json!({
            "from_id": "alice",
            "to_id": "owner",
            "amount": 10.0,
            "method": "cash",
            "recorded_by_id": "alice"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/participants/remove", ledger_id),
        Some(json!({ "participant_id": "owner", "removed_by_id": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/anchor/verify", ledger_id),
        Some(json!({ "message": "garbage" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_privacy_violation_is_unprocessable() {
    let _ = env_logger::try_init();
    let app = app();
    let ledger_id = create_ledger(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/ledgers/{}/participants/alice", ledger_id),
        Some(json!({ "name": "Alice 0791234567", "updated_by_id": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/ledgers/{}/snapshot", ledger_id),
        Some(json!({ "requested_by_id": "owner" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Snapshot refused: possible phone number in ledger data");
}
