mod common;

use axum::http::StatusCode;
use common::{body_json, event_payload, TestApp};

#[tokio::test]
async fn backups_capture_and_restore_the_sheet_state() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    app.send_json(
        "POST",
        "/api/v1/events",
        &admin,
        &event_payload("2024-06-10", "2024-06-10", &["Dom"]),
    )
    .await;

    let response = app.send_empty("POST", "/api/v1/backups", &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let name = body_json(response).await["name"].as_str().unwrap().to_string();
    assert!(name.starts_with("backup_"));

    // Mutate after the backup, then restore.
    let response = app.get("/api/v1/events", &admin).await;
    let id = body_json(response).await[0]["id"].as_str().unwrap().to_string();
    app.send_empty("DELETE", &format!("/api/v1/events/{id}"), &admin)
        .await;
    let response = app.get("/api/v1/events", &admin).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    let response = app
        .send_empty("POST", &format!("/api/v1/backups/{name}/restore"), &admin)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/v1/events", &admin).await;
    let events = body_json(response).await;
    assert_eq!(events.as_array().unwrap().len(), 1);
    assert_eq!(events[0]["id"], id.as_str());
}

#[tokio::test]
async fn restore_snapshots_the_current_state_first() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app.send_empty("POST", "/api/v1/backups", &admin).await;
    let name = body_json(response).await["name"].as_str().unwrap().to_string();

    let response = app
        .send_empty("POST", &format!("/api/v1/backups/{name}/restore"), &admin)
        .await;
    let body = body_json(response).await;
    let safety = body["previous_state"].as_str().unwrap();
    assert!(safety.starts_with("backup_"));

    let response = app.get("/api/v1/backups", &admin).await;
    let listed = body_json(response).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&name.as_str()));
    assert!(names.contains(&safety));
}

#[tokio::test]
async fn backups_are_admin_only_and_names_are_validated() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let staff = app
        .create_user_and_login("staff@example.com", "staff", None)
        .await;

    let response = app.send_empty("POST", "/api/v1/backups", &staff).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send_empty("POST", "/api/v1/backups/..%2Fdata/restore", &admin)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send_empty("DELETE", "/api/v1/backups/backup_29991231_000000", &admin)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_backup_removes_it_from_the_list() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app.send_empty("POST", "/api/v1/backups", &admin).await;
    let name = body_json(response).await["name"].as_str().unwrap().to_string();

    let response = app
        .send_empty("DELETE", &format!("/api/v1/backups/{name}"), &admin)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get("/api/v1/backups", &admin).await;
    let listed = body_json(response).await;
    assert!(listed.as_array().unwrap().is_empty());
}
