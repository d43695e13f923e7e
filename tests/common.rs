use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use trainer_scheduler::{
    api::router::create_router, config::Config, infra::factory::bootstrap_state, state::AppState,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "AdminPass123!";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _data_dir: TempDir,
    _backup_dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let data_dir = TempDir::new().expect("Failed to create test data dir");
        let backup_dir = TempDir::new().expect("Failed to create test backup dir");

        let config = Config {
            data_dir: data_dir.path().to_path_buf(),
            backup_dir: backup_dir.path().to_path_buf(),
            port: 0,
            jwt_secret: "integration-test-secret-not-for-production".to_string(),
            auth_issuer: "test-issuer".to_string(),
            seed_admin_email: ADMIN_EMAIL.to_string(),
            seed_admin_password: ADMIN_PASSWORD.to_string(),
        };

        let state = Arc::new(bootstrap_state(&config).await);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _data_dir: data_dir,
            _backup_dir: backup_dir,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = json!({ "email": email, "password": password });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies
            .iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..]
            .find(';')
            .unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body_json = body_json(response).await;
        let csrf_token = body_json["csrf_token"]
            .as_str()
            .expect("No csrf_token in body")
            .to_string();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    pub async fn login_admin(&self) -> AuthHeaders {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Creates an account through the admin API and returns its session.
    pub async fn create_user_and_login(
        &self,
        email: &str,
        role: &str,
        trainer_name: Option<&str>,
    ) -> AuthHeaders {
        let admin = self.login_admin().await;
        let password = "Welcome123!";
        let status = self
            .send_json(
                "POST",
                "/api/v1/users",
                &admin,
                &json!({
                    "email": email,
                    "password": password,
                    "role": role,
                    "trainer_name": trainer_name,
                }),
            )
            .await
            .status();
        assert_eq!(status, StatusCode::CREATED, "Failed to create {role} user");
        self.login(email, password).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        auth: &AuthHeaders,
        body: &Value,
    ) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, format!("access_token={}", auth.access_token))
                    .header("X-CSRF-Token", auth.csrf_token.clone())
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn send_empty(&self, method: &str, uri: &str, auth: &AuthHeaders) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::COOKIE, format!("access_token={}", auth.access_token))
                    .header("X-CSRF-Token", auth.csrf_token.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, auth: &AuthHeaders) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header(header::COOKIE, format!("access_token={}", auth.access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Standard multi-day event payload used across the suites.
#[allow(dead_code)]
pub fn event_payload(start: &str, end: &str, trainers: &[&str]) -> Value {
    json!({
        "start_date": start,
        "end_date": end,
        "event_type": "W",
        "status": "Offered",
        "source": "EQS",
        "client": "Acme",
        "description": "Leadership Workshop",
        "trainers": trainers,
        "medium": "F2F",
        "location": "Syd",
    })
}
