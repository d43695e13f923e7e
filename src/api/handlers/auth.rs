use crate::api::dtos::requests::{ChangePasswordRequest, LoginRequest};
use crate::api::dtos::responses::{AuthResponse, UserProfile};
use crate::api::extractors::auth::CurrentUser;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .filter(|u| u.active)
        .ok_or(AppError::Unauthorized)?;

    if !AuthService::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let (access_jwt, csrf_token) = state.auth_service.issue_token(&user)?;
    set_access_cookie(&cookies, &access_jwt);

    state.audit.append(&user.email, "login", "").await?;
    info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse {
        csrf_token,
        user: UserProfile::from(&user),
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    info!("User logged out");
    Ok(StatusCode::OK)
}

pub async fn me(user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserProfile {
        email: user.email,
        role: user.role,
        trainer_name: user.trainer_name,
    }))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.new_password.len() < 8 {
        return Err(AppError::Validation(
            "New password must be at least 8 characters".to_string(),
        ));
    }

    let mut account = state
        .users
        .find_by_email(&user.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !AuthService::verify_password(&payload.current_password, &account.password_hash) {
        return Err(AppError::Unauthorized);
    }

    account.password_hash = AuthService::hash_password(&payload.new_password)?;
    state.users.update(&account).await?;
    state
        .audit
        .append(&user.email, "change_password", "")
        .await?;

    Ok(StatusCode::OK)
}

fn set_access_cookie(cookies: &Cookies, access: &str) {
    let mut cookie = Cookie::new("access_token", access.to_string());
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::hours(12));
    cookies.add(cookie);
}
