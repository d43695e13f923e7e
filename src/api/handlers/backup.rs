use crate::api::extractors::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

pub async fn create_backup(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    let name = state.backups.create().await?;
    state.audit.append(&user.email, "create_backup", &name).await?;
    Ok((StatusCode::CREATED, Json(json!({ "name": name }))))
}

pub async fn list_backups(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    Ok(Json(state.backups.list().await?))
}

pub async fn restore_backup(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    let safety = state.backups.restore(&name).await?;
    state
        .audit
        .append(
            &user.email,
            "restore_backup",
            &format!("{name} (previous state saved as {safety})"),
        )
        .await?;
    Ok(Json(json!({ "restored": name, "previous_state": safety })))
}

pub async fn delete_backup(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    state.backups.delete(&name).await?;
    state.audit.append(&user.email, "delete_backup", &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only administrators may manage backups".to_string(),
        ))
    }
}
