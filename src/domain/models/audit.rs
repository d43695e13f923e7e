use chrono::{DateTime, Utc};
use serde::Serialize;

/// Append-only trail of who did what; one row per logged action.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: String,
    pub details: String,
}
