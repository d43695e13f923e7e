mod common;

use axum::http::StatusCode;
use common::{body_json, event_payload, TestApp};
use serde_json::json;

async fn create_source_event(app: &TestApp, auth: &common::AuthHeaders) -> String {
    app.send_json(
        "POST",
        "/api/v1/events",
        auth,
        &event_payload("2024-06-01", "2024-06-01", &["Dom"]),
    )
    .await;
    let response = app.get("/api/v1/events", auth).await;
    body_json(response).await[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn duplicating_over_a_blocked_day_skips_it_when_the_toggle_is_on() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let id = create_source_event(&app, &admin).await;

    app.send_json(
        "POST",
        "/api/v1/marks",
        &admin,
        &json!({ "start_date": "2024-06-11", "trainers": ["All"] }),
    )
    .await;

    let response = app
        .send_json(
            "POST",
            &format!("/api/v1/events/{id}/duplicate"),
            &admin,
            &json!({ "start_date": "2024-06-10", "end_date": "2024-06-12" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let outcome = body_json(response).await;
    assert_eq!(outcome["created"], 2);
    assert_eq!(outcome["skipped"], json!(["2024-06-11"]));
}

#[tokio::test]
async fn duplicating_over_a_blocked_day_proceeds_when_the_toggle_is_off() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let id = create_source_event(&app, &admin).await;

    app.send_json(
        "POST",
        "/api/v1/marks",
        &admin,
        &json!({ "start_date": "2024-06-11", "trainers": ["All"] }),
    )
    .await;
    app.send_json(
        "PUT",
        "/api/v1/settings/rules",
        &admin,
        &json!({
            "blocked_allows_visible_events": true,
            "only_admin_can_block": true,
            "blocked_prevents_duplicates": false,
        }),
    )
    .await;

    let response = app
        .send_json(
            "POST",
            &format!("/api/v1/events/{id}/duplicate"),
            &admin,
            &json!({ "start_date": "2024-06-10", "end_date": "2024-06-12" }),
        )
        .await;

    let outcome = body_json(response).await;
    assert_eq!(outcome["created"], 3);
    assert_eq!(outcome["skipped"], json!([]));
}

#[tokio::test]
async fn a_fully_blocked_duplicate_range_succeeds_with_zero_records() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let id = create_source_event(&app, &admin).await;

    app.send_json(
        "POST",
        "/api/v1/marks",
        &admin,
        &json!({ "start_date": "2024-06-10", "trainers": ["Dom"] }),
    )
    .await;

    let response = app
        .send_json(
            "POST",
            &format!("/api/v1/events/{id}/duplicate"),
            &admin,
            &json!({ "start_date": "2024-06-10" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let outcome = body_json(response).await;
    assert_eq!(outcome["created"], 0);
    assert_eq!(outcome["skipped"], json!(["2024-06-10"]));
}

#[tokio::test]
async fn duplicates_carry_fields_but_get_fresh_provenance() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let id = create_source_event(&app, &admin).await;

    app.send_json(
        "POST",
        &format!("/api/v1/events/{id}/duplicate"),
        &admin,
        &json!({ "start_date": "2024-06-05" }),
    )
    .await;

    let response = app.get("/api/v1/events?from=2024-06-05&to=2024-06-05", &admin).await;
    let copies = body_json(response).await;
    let copy = &copies[0];
    assert_ne!(copy["id"].as_str().unwrap(), id);
    assert_eq!(copy["client"], "Acme");
    assert_eq!(copy["action"], "Duplicated");
    assert_eq!(copy["is_marked"], false);
}

#[tokio::test]
async fn duplicating_a_blocking_record_yields_a_plain_event() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    app.send_json(
        "POST",
        "/api/v1/marks",
        &admin,
        &json!({ "start_date": "2024-06-01", "trainers": ["Dom"], "reason": "Leave" }),
    )
    .await;
    let response = app.get("/api/v1/marks", &admin).await;
    let id = body_json(response).await[0]["id"].as_str().unwrap().to_string();

    let response = app
        .send_json(
            "POST",
            &format!("/api/v1/events/{id}/duplicate"),
            &admin,
            &json!({ "start_date": "2024-06-05" }),
        )
        .await;
    assert_eq!(body_json(response).await["created"], 1);

    let response = app.get("/api/v1/events?from=2024-06-05&to=2024-06-05", &admin).await;
    let copy = body_json(response).await[0].clone();
    assert_eq!(copy["is_marked"], false);
    assert_eq!(copy["marked_for"], serde_json::Value::Null);
    assert!(!copy["title"].as_str().unwrap().starts_with("BLOCKED"));
}
