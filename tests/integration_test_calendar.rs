mod common;

use axum::http::StatusCode;
use common::{body_json, event_payload, TestApp};
use serde_json::json;

#[tokio::test]
async fn month_view_splits_events_and_blocks_per_day() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    app.send_json(
        "POST",
        "/api/v1/events",
        &admin,
        &event_payload("2024-06-10", "2024-06-10", &["Dom"]),
    )
    .await;
    app.send_json(
        "POST",
        "/api/v1/marks",
        &admin,
        &json!({ "start_date": "2024-06-11", "trainers": ["Dale"], "reason": "Leave" }),
    )
    .await;

    let response = app.get("/api/v1/calendar/2024/6", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cells = body_json(response).await;
    let cells = cells.as_array().unwrap();
    assert_eq!(cells.len(), 30);

    let tenth = &cells[9];
    assert_eq!(tenth["date"], "2024-06-10");
    assert_eq!(tenth["events"].as_array().unwrap().len(), 1);
    assert!(tenth["blocks"].as_array().unwrap().is_empty());

    let eleventh = &cells[10];
    assert!(eleventh["events"].as_array().unwrap().is_empty());
    assert_eq!(eleventh["blocks"][0]["scope"], "Dale");
    assert_eq!(eleventh["blocks"][0]["reason"], "Leave");
}

#[tokio::test]
async fn the_trainer_query_narrows_the_view_with_token_matching() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    app.send_json(
        "POST",
        "/api/v1/events",
        &admin,
        &event_payload("2024-06-10", "2024-06-10", &["Andrew"]),
    )
    .await;

    let response = app.get("/api/v1/calendar/2024/6?trainer=Andrew", &admin).await;
    let cells = body_json(response).await;
    assert_eq!(cells[9]["events"].as_array().unwrap().len(), 1);

    let response = app.get("/api/v1/calendar/2024/6?trainer=An", &admin).await;
    let cells = body_json(response).await;
    assert!(cells[9]["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn hiding_events_on_blocked_days_is_a_display_rule_only() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    // Event for Dale on a day that later gets a Dom-only block.
    app.send_json(
        "POST",
        "/api/v1/events",
        &admin,
        &event_payload("2024-06-10", "2024-06-10", &["Dale"]),
    )
    .await;
    app.send_json(
        "POST",
        "/api/v1/marks",
        &admin,
        &json!({ "start_date": "2024-06-10", "trainers": ["Dom"] }),
    )
    .await;

    // Toggle on: the event stays visible next to the block.
    let response = app.get("/api/v1/calendar/2024/6", &admin).await;
    let cells = body_json(response).await;
    assert_eq!(cells[9]["events"].as_array().unwrap().len(), 1);
    assert_eq!(cells[9]["blocks"].as_array().unwrap().len(), 1);

    app.send_json(
        "PUT",
        "/api/v1/settings/rules",
        &admin,
        &json!({
            "blocked_allows_visible_events": false,
            "only_admin_can_block": true,
            "blocked_prevents_duplicates": true,
        }),
    )
    .await;

    // Toggle off: the same day hides its events but keeps the block badge.
    let response = app.get("/api/v1/calendar/2024/6", &admin).await;
    let cells = body_json(response).await;
    assert!(cells[9]["events"].as_array().unwrap().is_empty());
    assert_eq!(cells[9]["blocks"].as_array().unwrap().len(), 1);

    // The stored record is untouched; the list endpoint still returns it.
    let response = app.get("/api/v1/events?trainer=Dale", &admin).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn trainer_logins_are_pinned_to_their_own_calendar() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let trainer = app
        .create_user_and_login("dom@example.com", "trainer", Some("Dom"))
        .await;

    app.send_json(
        "POST",
        "/api/v1/events",
        &admin,
        &event_payload("2024-06-10", "2024-06-10", &["Dom"]),
    )
    .await;
    app.send_json(
        "POST",
        "/api/v1/events",
        &admin,
        &event_payload("2024-06-10", "2024-06-10", &["Dale"]),
    )
    .await;

    // Even asking for Dale's calendar, a trainer login sees only its own.
    let response = app.get("/api/v1/calendar/2024/6?trainer=Dale", &trainer).await;
    let cells = body_json(response).await;
    let events = cells[9]["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["trainers"], json!(["Dom"]));
}

#[tokio::test]
async fn an_invalid_month_is_a_400() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app.get("/api/v1/calendar/2024/13", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
