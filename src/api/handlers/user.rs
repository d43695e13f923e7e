use crate::api::dtos::requests::{CreateUserRequest, UpdateUserRequest};
use crate::api::dtos::responses::UserProfile;
use crate::api::extractors::auth::CurrentUser;
use crate::domain::models::user::UserAccount;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    let users = state.users.list().await?;
    let profiles: Vec<UserProfile> = users.iter().map(UserProfile::from).collect();
    Ok(Json(profiles))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    if payload.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let account = UserAccount {
        email: payload.email.trim().to_lowercase(),
        role: payload.role,
        trainer_name: payload.trainer_name,
        active: payload.active,
        password_hash: AuthService::hash_password(&payload.password)?,
    };
    let created = state.users.create(&account).await?;
    state
        .audit
        .append(&user.email, "create_user", &created.email)
        .await?;

    Ok((StatusCode::CREATED, Json(UserProfile::from(&created))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;

    let email = payload.email.trim().to_lowercase();
    let mut account = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {email} not found")))?;

    if let Some(role) = payload.role {
        account.role = role;
    }
    if let Some(trainer_name) = payload.trainer_name {
        account.trainer_name = if trainer_name.trim().is_empty() {
            None
        } else {
            Some(trainer_name)
        };
    }
    if let Some(active) = payload.active {
        account.active = active;
    }
    if let Some(password) = payload.password {
        if password.len() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        account.password_hash = AuthService::hash_password(&password)?;
    }

    let updated = state.users.update(&account).await?;
    state
        .audit
        .append(&user.email, "update_user", &updated.email)
        .await?;

    Ok(Json(UserProfile::from(&updated)))
}

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only administrators may manage users".to_string(),
        ))
    }
}
