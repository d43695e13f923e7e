use crate::api::dtos::requests::CalendarQuery;
use crate::api::dtos::responses::{BlockBadge, DayCell};
use crate::api::extractors::auth::CurrentUser;
use crate::domain::services::titles;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Month grid: one cell per day, events and blocks split. The
/// `blocked_allows_visible_events` toggle only changes what this view shows;
/// the write paths never consult it.
pub async fn month_view(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("Invalid month: {year}-{month}")))?;

    // Trainer logins always see their own calendar.
    let trainer_filter = match user.trainer_name {
        Some(own) => Some(own),
        None => query.trainer,
    };

    let policy = state.settings.policy().await?;
    let snapshot = state.events.load_snapshot().await?;

    let mut cells = Vec::new();
    let mut day = first;
    while day.month() == month && day.year() == year {
        let mut events = Vec::new();
        let mut blocks = Vec::new();
        for record in snapshot.iter().filter(|r| r.date == day) {
            if let Some(trainer) = &trainer_filter {
                if !record.involves_trainer(trainer) {
                    continue;
                }
            }
            if record.is_marked {
                let scope = record
                    .marked_for
                    .as_ref()
                    .map(|scope| scope.to_string())
                    .unwrap_or_default();
                let reason = if record.notes.trim().is_empty() {
                    titles::DEFAULT_BLOCK_REASON.to_string()
                } else {
                    record.notes.clone()
                };
                blocks.push(BlockBadge {
                    id: record.id.clone(),
                    scope,
                    reason,
                });
            } else {
                events.push(record.clone());
            }
        }
        if !policy.blocked_allows_visible_events && !blocks.is_empty() {
            events.clear();
        }
        cells.push(DayCell {
            date: day,
            events,
            blocks,
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(Json(cells))
}
