use crate::api::dtos::requests::UpsertTrainerRequest;
use crate::api::extractors::auth::CurrentUser;
use crate::domain::models::trainer::Trainer;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

pub async fn list_trainers(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.trainers.list().await?))
}

pub async fn create_trainer(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<UpsertTrainerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let trainer = upsert(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(trainer)))
}

pub async fn update_trainer(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<UpsertTrainerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let trainer = upsert(&state, &user, payload).await?;
    Ok(Json(trainer))
}

async fn upsert(
    state: &AppState,
    user: &CurrentUser,
    payload: UpsertTrainerRequest,
) -> Result<Trainer, AppError> {
    if !user.role.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators may manage trainers".to_string(),
        ));
    }
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Trainer name is required".to_string()));
    }
    let trainer = state
        .trainers
        .upsert(&Trainer {
            name,
            color: payload.color,
            active: payload.active,
        })
        .await?;
    state
        .audit
        .append(&user.email, "upsert_trainer", &trainer.name)
        .await?;
    Ok(trainer)
}
