use crate::api::extractors::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

pub async fn list_audit(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators may read the audit trail".to_string(),
        ));
    }
    Ok(Json(state.audit.list().await?))
}
