use crate::api::dtos::requests::MarkRequest;
use crate::api::dtos::responses::MarkResponse;
use crate::api::extractors::auth::CurrentUser;
use crate::domain::models::event::{ActionKind, EventRecord, Scope, WriteStamp};
use crate::domain::services::conflict;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn list_marks(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.events.load_snapshot().await?;
    let marks: Vec<EventRecord> = snapshot.into_iter().filter(|r| r.is_marked).collect();
    Ok(Json(marks))
}

pub async fn create_marks(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<MarkRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_edit_events() {
        return Err(AppError::Forbidden(
            "Your role cannot mark dates".to_string(),
        ));
    }

    // An explicit "All" selection collapses to the wildcard scope; anything
    // else stays a named selection, empty included, so the rule engine owns
    // the empty-selection rejection.
    let scope = if payload
        .trainers
        .iter()
        .any(|name| name.trim().eq_ignore_ascii_case("all"))
    {
        Scope::All
    } else {
        Scope::Named(
            payload
                .trainers
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    };

    let policy = state.settings.policy().await?;
    let mut snapshot = state.events.load_snapshot().await?;
    let end = payload.end_date.unwrap_or(payload.start_date);
    let stamp = WriteStamp::new(&user.email, ActionKind::Marked);
    let plan = conflict::plan_marks(
        &snapshot,
        payload.start_date,
        end,
        &scope,
        payload.reason.as_deref(),
        &policy,
        user.role.is_admin(),
        &stamp,
    )?;

    let created = plan.records.len();
    if created > 0 {
        snapshot.extend(plan.records);
        state.events.save_snapshot(&snapshot).await?;
    }
    state
        .audit
        .append(
            &user.email,
            "mark_dates",
            &format!(
                "scope {scope}, {created} created, {} already marked",
                plan.already_marked.len()
            ),
        )
        .await?;
    info!("Marked {} day(s) for scope {}", created, scope);

    Ok((
        StatusCode::CREATED,
        Json(MarkResponse {
            created,
            already_marked: plan.already_marked,
        }),
    ))
}

/// Unmark: removes one blocking record, behind the same gate as marking.
pub async fn delete_mark(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_edit_events() {
        return Err(AppError::Forbidden(
            "Your role cannot unmark dates".to_string(),
        ));
    }
    let policy = state.settings.policy().await?;
    if policy.only_admin_can_block && !user.role.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators may unmark dates".to_string(),
        ));
    }

    let mut snapshot = state.events.load_snapshot().await?;
    let record = snapshot
        .iter()
        .find(|record| record.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Mark {id} not found")))?;
    if !record.is_marked {
        return Err(AppError::Validation(format!(
            "Event {id} is not a blocking record"
        )));
    }

    snapshot.retain(|r| r.id != id);
    state.events.save_snapshot(&snapshot).await?;
    state
        .audit
        .append(&user.email, "unmark_date", &format!("id {id}, date {}", record.date))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
