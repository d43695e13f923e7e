use crate::api::dtos::requests::{
    BulkDeleteRequest, BulkUpdateRequest, DuplicateRequest, EventFilter, EventPayload,
};
use crate::api::dtos::responses::{CreatedResponse, DuplicateResponse};
use crate::api::extractors::auth::CurrentUser;
use crate::domain::models::event::{ActionKind, EventRecord, WriteStamp};
use crate::domain::services::{conflict, titles};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(filter): Query<EventFilter>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.events.load_snapshot().await?;
    let matched: Vec<EventRecord> = snapshot
        .into_iter()
        .filter(|record| matches_filter(record, &filter))
        .collect();
    Ok(Json(matched))
}

/// CSV download of the filtered set, column layout matching the sheet.
pub async fn export_events(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(filter): Query<EventFilter>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.events.load_snapshot().await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Title",
        "Date",
        "Type",
        "Status",
        "Source",
        "Client",
        "Course/Description",
        "Trainer Calendar",
        "Medium",
        "Location",
        "Billing",
        "Invoiced",
        "Notes",
    ])?;
    for record in snapshot.iter().filter(|r| matches_filter(r, &filter)) {
        writer.write_record([
            record.title.as_str(),
            &record.date.format("%Y-%m-%d").to_string(),
            &record.event_type,
            &record.status,
            &record.source,
            &record.client,
            &record.description,
            &record.trainers.join(", "),
            &record.medium,
            &record.location,
            &record.billing,
            if record.invoiced { "Yes" } else { "No" },
            &record.notes,
        ])?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"events.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<EventPayload>,
) -> Result<impl IntoResponse, AppError> {
    require_editor(&user)?;
    let trainers = resolve_trainers(&state, &payload.trainers).await?;
    let draft = payload.draft_with(trainers);

    let mut snapshot = state.events.load_snapshot().await?;
    let stamp = WriteStamp::new(&user.email, ActionKind::Created);
    let records = conflict::plan_create(
        &snapshot,
        payload.start_date,
        payload.end_date(),
        &draft,
        &stamp,
    )?;
    let created = records.len();

    snapshot.extend(records);
    state.events.save_snapshot(&snapshot).await?;
    state
        .audit
        .append(
            &user.email,
            "create_event",
            &format!(
                "{} record(s), {} to {}",
                created,
                payload.start_date,
                payload.end_date()
            ),
        )
        .await?;
    info!("Created {} event record(s)", created);

    Ok((StatusCode::CREATED, Json(CreatedResponse { created })))
}

/// Edit drops the existing row and re-runs the strict create path over the
/// submitted range, so an edit can never land on a blocked day either.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> Result<impl IntoResponse, AppError> {
    require_editor(&user)?;
    let trainers = resolve_trainers(&state, &payload.trainers).await?;
    let draft = payload.draft_with(trainers);

    let mut snapshot = state.events.load_snapshot().await?;
    let existing = snapshot
        .iter()
        .find(|record| record.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))?;

    // Editing a blocking record into anything else removes the block, so
    // the mark gate applies here just as it does on delete.
    if existing.is_marked {
        let policy = state.settings.policy().await?;
        if policy.only_admin_can_block && !user.role.is_admin() {
            return Err(AppError::Forbidden(
                "Only administrators may unmark dates".to_string(),
            ));
        }
    }

    snapshot.retain(|record| record.id != id);

    let stamp = WriteStamp::new(&user.email, ActionKind::Modified);
    let records = conflict::plan_create(
        &snapshot,
        payload.start_date,
        payload.end_date(),
        &draft,
        &stamp,
    )?;
    let created = records.len();

    snapshot.extend(records);
    state.events.save_snapshot(&snapshot).await?;
    state
        .audit
        .append(&user.email, "update_event", &format!("id {id}"))
        .await?;

    Ok(Json(CreatedResponse { created }))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_editor(&user)?;

    let mut snapshot = state.events.load_snapshot().await?;
    let record = snapshot
        .iter()
        .find(|record| record.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))?;

    // Removing a blocking record is an unmark; the mark gate applies.
    if record.is_marked {
        let policy = state.settings.policy().await?;
        if policy.only_admin_can_block && !user.role.is_admin() {
            return Err(AppError::Forbidden(
                "Only administrators may unmark dates".to_string(),
            ));
        }
    }

    snapshot.retain(|r| r.id != id);
    state.events.save_snapshot(&snapshot).await?;
    state
        .audit
        .append(&user.email, "delete_event", &format!("id {id}"))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn bulk_update(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<BulkUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_editor(&user)?;
    if payload.ids.is_empty() {
        return Err(AppError::Validation("No event ids selected".to_string()));
    }

    let trainers = match &payload.trainers {
        Some(selection) => Some(resolve_trainers(&state, selection).await?),
        None => None,
    };

    let mut snapshot = state.events.load_snapshot().await?;
    let stamp = WriteStamp::new(&user.email, ActionKind::BulkModified);
    let mut updated = 0;
    for record in snapshot.iter_mut() {
        if !payload.ids.contains(&record.id) {
            continue;
        }
        apply_field(&mut record.event_type, &payload.event_type);
        apply_field(&mut record.status, &payload.status);
        apply_field(&mut record.source, &payload.source);
        apply_field(&mut record.client, &payload.client);
        apply_field(&mut record.description, &payload.description);
        apply_field(&mut record.medium, &payload.medium);
        apply_field(&mut record.location, &payload.location);
        apply_field(&mut record.billing, &payload.billing);
        apply_field(&mut record.notes, &payload.notes);
        if let Some(invoiced) = payload.invoiced {
            record.invoiced = invoiced;
        }
        if let Some(trainers) = &trainers {
            record.trainers = trainers.clone();
        }
        record.modified_at = stamp.at;
        record.modified_by = stamp.actor.clone();
        record.action = stamp.action;
        record.title = titles::derive_title(record);
        updated += 1;
    }
    if updated == 0 {
        return Err(AppError::NotFound(
            "None of the selected events exist".to_string(),
        ));
    }

    state.events.save_snapshot(&snapshot).await?;
    state
        .audit
        .append(&user.email, "bulk_update", &format!("{updated} record(s)"))
        .await?;

    Ok(Json(CreatedResponse { created: updated }))
}

pub async fn bulk_delete(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_editor(&user)?;
    if payload.ids.is_empty() {
        return Err(AppError::Validation("No event ids selected".to_string()));
    }

    let mut snapshot = state.events.load_snapshot().await?;
    let selected_marked = snapshot
        .iter()
        .any(|record| payload.ids.contains(&record.id) && record.is_marked);
    if selected_marked {
        let policy = state.settings.policy().await?;
        if policy.only_admin_can_block && !user.role.is_admin() {
            return Err(AppError::Forbidden(
                "Only administrators may unmark dates".to_string(),
            ));
        }
    }

    let before = snapshot.len();
    snapshot.retain(|record| !payload.ids.contains(&record.id));
    let removed = before - snapshot.len();

    state.events.save_snapshot(&snapshot).await?;
    state
        .audit
        .append(&user.email, "bulk_delete", &format!("{removed} record(s)"))
        .await?;

    Ok(Json(CreatedResponse { created: removed }))
}

pub async fn duplicate_event(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<DuplicateRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_editor(&user)?;

    let mut snapshot = state.events.load_snapshot().await?;
    let source = snapshot
        .iter()
        .find(|record| record.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))?;

    let policy = state.settings.policy().await?;
    let end = payload.end_date.unwrap_or(payload.start_date);
    let stamp = WriteStamp::new(&user.email, ActionKind::Duplicated);
    let plan = conflict::plan_duplicate(&snapshot, &source, payload.start_date, end, &policy, &stamp)?;

    let created = plan.records.len();
    if created > 0 {
        snapshot.extend(plan.records);
        state.events.save_snapshot(&snapshot).await?;
    }
    state
        .audit
        .append(
            &user.email,
            "duplicate_event",
            &format!("id {id}, {created} created, {} skipped", plan.skipped.len()),
        )
        .await?;

    Ok(Json(DuplicateResponse {
        created,
        skipped: plan.skipped,
    }))
}

fn require_editor(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.can_edit_events() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Your role cannot modify events".to_string(),
        ))
    }
}

/// Expands the "All" wildcard to the active roster; rejects an empty result.
async fn resolve_trainers(
    state: &AppState,
    selection: &[String],
) -> Result<Vec<String>, AppError> {
    let resolved = if selection
        .iter()
        .any(|name| name.trim().eq_ignore_ascii_case("all"))
    {
        state.trainers.active_names().await?
    } else {
        selection
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    };
    if resolved.is_empty() {
        return Err(AppError::Validation(
            "Select at least one trainer".to_string(),
        ));
    }
    Ok(resolved)
}

fn apply_field(target: &mut String, source: &Option<String>) {
    if let Some(value) = source {
        *target = value.clone();
    }
}

fn matches_filter(record: &EventRecord, filter: &EventFilter) -> bool {
    if filter.from.is_some_and(|from| record.date < from) {
        return false;
    }
    if filter.to.is_some_and(|to| record.date > to) {
        return false;
    }
    if let Some(trainer) = &filter.trainer {
        if !record.involves_trainer(trainer) {
            return false;
        }
    }
    if let Some(status) = &filter.status {
        if !record.status.eq_ignore_ascii_case(status) {
            return false;
        }
    }
    if let Some(source) = &filter.source {
        if !record.source.eq_ignore_ascii_case(source) {
            return false;
        }
    }
    if let Some(client) = &filter.client {
        if !record
            .client
            .to_lowercase()
            .contains(&client.to_lowercase())
        {
            return false;
        }
    }
    true
}
