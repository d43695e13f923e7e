use crate::domain::models::audit::AuditEntry;
use crate::domain::ports::AuditLog;
use crate::error::AppError;
use crate::infra::repositories::sheets;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const AUDIT_SHEET: &str = "audit.csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize, Deserialize)]
struct AuditRow {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "User")]
    user: String,
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Details")]
    details: String,
}

pub struct CsvAuditLog {
    path: PathBuf,
}

impl CsvAuditLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(AUDIT_SHEET),
        }
    }
}

#[async_trait]
impl AuditLog for CsvAuditLog {
    async fn append(&self, user: &str, action: &str, details: &str) -> Result<(), AppError> {
        let mut rows: Vec<AuditRow> = sheets::read_rows(&self.path).await?;
        rows.push(AuditRow {
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            user: user.to_string(),
            action: action.to_string(),
            details: details.to_string(),
        });
        sheets::write_rows(&self.path, &rows).await
    }

    async fn list(&self) -> Result<Vec<AuditEntry>, AppError> {
        let rows: Vec<AuditRow> = sheets::read_rows(&self.path).await?;
        Ok(rows
            .into_iter()
            .map(|row| AuditEntry {
                timestamp: NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
                    .map(|naive| naive.and_utc())
                    .unwrap_or_else(|_| Utc::now()),
                user: row.user,
                action: row.action,
                details: row.details,
            })
            .collect())
    }
}
