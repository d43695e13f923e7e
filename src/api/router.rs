use crate::api::handlers::{
    audit, auth, backup, calendar, event, health, mark, settings, trainer, user,
};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/auth/change-password", post(auth::change_password))

        // Events
        .route("/api/v1/events", get(event::list_events).post(event::create_event))
        .route("/api/v1/events/export", get(event::export_events))
        .route("/api/v1/events/bulk-update", post(event::bulk_update))
        .route("/api/v1/events/bulk-delete", post(event::bulk_delete))
        .route(
            "/api/v1/events/{id}",
            put(event::update_event).delete(event::delete_event),
        )
        .route("/api/v1/events/{id}/duplicate", post(event::duplicate_event))

        // Blocked dates
        .route("/api/v1/marks", get(mark::list_marks).post(mark::create_marks))
        .route("/api/v1/marks/{id}", delete(mark::delete_mark))

        // Calendar
        .route("/api/v1/calendar/{year}/{month}", get(calendar::month_view))

        // Trainers
        .route(
            "/api/v1/trainers",
            get(trainer::list_trainers)
                .post(trainer::create_trainer)
                .put(trainer::update_trainer),
        )

        // Settings
        .route(
            "/api/v1/settings/rules",
            get(settings::get_rules).put(settings::put_rules),
        )
        .route(
            "/api/v1/settings/defaults",
            get(settings::get_defaults).put(settings::put_defaults),
        )
        .route(
            "/api/v1/settings/lists",
            get(settings::get_lists).put(settings::put_lists),
        )

        // Users
        .route(
            "/api/v1/users",
            get(user::list_users).post(user::create_user).put(user::update_user),
        )

        // Backups
        .route(
            "/api/v1/backups",
            get(backup::list_backups).post(backup::create_backup),
        )
        .route("/api/v1/backups/{name}/restore", post(backup::restore_backup))
        .route("/api/v1/backups/{name}", delete(backup::delete_backup))

        // Audit
        .route("/api/v1/audit", get(audit::list_audit))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!(
                        "started processing request: {} {}",
                        request.method(),
                        request.uri().path()
                    );
                })
                .on_response(
                    |response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                        info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis(),
                            "finished processing request"
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        error!("request failed: {:?}", error);
                    },
                ),
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
