use crate::domain::models::event::BlockConflict;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("End date cannot be before start date")]
    InvalidRange,
    #[error("Cannot write event, blocked for: {}", join_conflicts(.0))]
    BlockedDates(Vec<BlockConflict>),
    #[error("Invalid trainer scope: {0}")]
    InvalidScope(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sheet error: {0}")]
    Sheet(#[from] csv::Error),
    #[error("Internal server error")]
    Internal,
}

fn join_conflicts(conflicts: &[BlockConflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("{} ({})", c.date, c.trainer))
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRange => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BlockedDates(conflicts) => {
                // The caller needs the exact (day, trainer) pairs for display.
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": self.to_string(),
                        "conflicts": conflicts,
                    })),
                )
                    .into_response();
            }
            AppError::InvalidScope(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Io(e) => {
                error!("Storage I/O error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Sheet(e) => {
                error!("Sheet parse/write error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
