use crate::api::extractors::auth::CurrentUser;
use crate::domain::models::settings::{BlockingPolicy, EventDefaults, ListEntry};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

pub async fn get_rules(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.settings.policy().await?))
}

pub async fn put_rules(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(policy): Json<BlockingPolicy>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    state.settings.set_policy(&policy).await?;
    state
        .audit
        .append(
            &user.email,
            "update_rules",
            &format!(
                "visible_events={}, only_admin={}, prevents_duplicates={}",
                policy.blocked_allows_visible_events,
                policy.only_admin_can_block,
                policy.blocked_prevents_duplicates
            ),
        )
        .await?;
    Ok(Json(policy))
}

pub async fn get_defaults(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.settings.defaults().await?))
}

pub async fn put_defaults(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(defaults): Json<EventDefaults>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    state.settings.set_defaults(&defaults).await?;
    state
        .audit
        .append(&user.email, "update_defaults", "")
        .await?;
    Ok(Json(defaults))
}

pub async fn get_lists(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.settings.lists().await?))
}

pub async fn put_lists(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(entries): Json<Vec<ListEntry>>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    state.settings.set_lists(&entries).await?;
    state
        .audit
        .append(
            &user.email,
            "update_lists",
            &format!("{} entries", entries.len()),
        )
        .await?;
    Ok(Json(entries))
}

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only administrators may change settings".to_string(),
        ))
    }
}
