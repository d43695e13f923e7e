mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_json, event_payload, TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": ADMIN_EMAIL, "password": "wrong" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_an_unknown_account() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "nobody@example.com", "password": "whatever" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutating_requests_require_the_csrf_token() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    // Same cookie, no X-CSRF-Token header.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(
                    header::COOKIE,
                    format!("access_token={}", admin.access_token),
                )
                .body(Body::from(
                    event_payload("2024-06-10", "2024-06-10", &["Dom"]).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A wrong token is also rejected.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(
                    header::COOKIE,
                    format!("access_token={}", admin.access_token),
                )
                .header("X-CSRF-Token", "forged")
                .body(Body::from(
                    event_payload("2024-06-10", "2024-06-10", &["Dom"]).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Reads pass without it.
    let response = app.get("/api/v1/events", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_returns_the_profile_of_the_session() {
    let app = TestApp::new().await;
    let trainer = app
        .create_user_and_login("dom@example.com", "trainer", Some("Dom"))
        .await;

    let response = app.get("/api/v1/auth/me", &trainer).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["email"], "dom@example.com");
    assert_eq!(profile["role"], "trainer");
    assert_eq!(profile["trainer_name"], "Dom");
}

#[tokio::test]
async fn change_password_rotates_the_credential() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app
        .send_json(
            "POST",
            "/api/v1/auth/change-password",
            &admin,
            &json!({
                "current_password": ADMIN_PASSWORD,
                "new_password": "EvenBetter456!",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password out, new password in.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.login(ADMIN_EMAIL, "EvenBetter456!").await;
}

#[tokio::test]
async fn change_password_requires_the_current_one() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app
        .send_json(
            "POST",
            "/api/v1/auth/change-password",
            &admin,
            &json!({
                "current_password": "not-the-password",
                "new_password": "EvenBetter456!",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivated_accounts_cannot_log_in() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    app.create_user_and_login("staff@example.com", "staff", None)
        .await;

    app.send_json(
        "PUT",
        "/api/v1/users",
        &admin,
        &json!({ "email": "staff@example.com", "active": false }),
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "staff@example.com", "password": "Welcome123!" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_access_cookie() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app.send_empty("POST", "/api/v1/auth/logout", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let removal = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap())
        .find(|c| c.contains("access_token="))
        .expect("logout must reset the access_token cookie");
    assert!(removal.contains("access_token=;") || removal.contains("Max-Age=0"));
}
