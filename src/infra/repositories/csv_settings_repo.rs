use crate::domain::models::settings::{BlockingPolicy, EventDefaults, ListEntry};
use crate::domain::ports::SettingsRepository;
use crate::error::AppError;
use crate::infra::repositories::sheets;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RULES_SHEET: &str = "rules.csv";
pub const DEFAULTS_SHEET: &str = "defaults.csv";
pub const LISTS_SHEET: &str = "lists.csv";

#[derive(Serialize, Deserialize)]
struct KeyValueRow {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Serialize, Deserialize)]
struct ListRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Active")]
    active: bool,
}

pub struct CsvSettingsRepo {
    rules_path: PathBuf,
    defaults_path: PathBuf,
    lists_path: PathBuf,
}

impl CsvSettingsRepo {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            rules_path: data_dir.join(RULES_SHEET),
            defaults_path: data_dir.join(DEFAULTS_SHEET),
            lists_path: data_dir.join(LISTS_SHEET),
        }
    }
}

fn lookup_bool(rows: &[KeyValueRow], key: &str, fallback: bool) -> bool {
    rows.iter()
        .find(|row| row.key == key)
        .map(|row| matches!(row.value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"))
        .unwrap_or(fallback)
}

fn lookup_string(rows: &[KeyValueRow], key: &str, fallback: &str) -> String {
    rows.iter()
        .find(|row| row.key == key)
        .map(|row| row.value.clone())
        .unwrap_or_else(|| fallback.to_string())
}

#[async_trait]
impl SettingsRepository for CsvSettingsRepo {
    async fn policy(&self) -> Result<BlockingPolicy, AppError> {
        let rows: Vec<KeyValueRow> = sheets::read_rows(&self.rules_path).await?;
        let fallback = BlockingPolicy::default();
        Ok(BlockingPolicy {
            blocked_allows_visible_events: lookup_bool(
                &rows,
                "blocked_allows_visible_events",
                fallback.blocked_allows_visible_events,
            ),
            only_admin_can_block: lookup_bool(
                &rows,
                "only_admin_can_block",
                fallback.only_admin_can_block,
            ),
            blocked_prevents_duplicates: lookup_bool(
                &rows,
                "blocked_prevents_duplicates",
                fallback.blocked_prevents_duplicates,
            ),
        })
    }

    async fn set_policy(&self, policy: &BlockingPolicy) -> Result<(), AppError> {
        let rows = vec![
            KeyValueRow {
                key: "blocked_allows_visible_events".to_string(),
                value: policy.blocked_allows_visible_events.to_string(),
            },
            KeyValueRow {
                key: "only_admin_can_block".to_string(),
                value: policy.only_admin_can_block.to_string(),
            },
            KeyValueRow {
                key: "blocked_prevents_duplicates".to_string(),
                value: policy.blocked_prevents_duplicates.to_string(),
            },
        ];
        sheets::write_rows(&self.rules_path, &rows).await
    }

    async fn defaults(&self) -> Result<EventDefaults, AppError> {
        let rows: Vec<KeyValueRow> = sheets::read_rows(&self.defaults_path).await?;
        let fallback = EventDefaults::default();
        Ok(EventDefaults {
            default_type: lookup_string(&rows, "default_type", &fallback.default_type),
            default_status: lookup_string(&rows, "default_status", &fallback.default_status),
            default_source: lookup_string(&rows, "default_source", &fallback.default_source),
            default_medium: lookup_string(&rows, "default_medium", &fallback.default_medium),
            default_location: lookup_string(&rows, "default_location", &fallback.default_location),
        })
    }

    async fn set_defaults(&self, defaults: &EventDefaults) -> Result<(), AppError> {
        let rows = vec![
            KeyValueRow {
                key: "default_type".to_string(),
                value: defaults.default_type.clone(),
            },
            KeyValueRow {
                key: "default_status".to_string(),
                value: defaults.default_status.clone(),
            },
            KeyValueRow {
                key: "default_source".to_string(),
                value: defaults.default_source.clone(),
            },
            KeyValueRow {
                key: "default_medium".to_string(),
                value: defaults.default_medium.clone(),
            },
            KeyValueRow {
                key: "default_location".to_string(),
                value: defaults.default_location.clone(),
            },
        ];
        sheets::write_rows(&self.defaults_path, &rows).await
    }

    async fn lists(&self) -> Result<Vec<ListEntry>, AppError> {
        let rows: Vec<ListRow> = sheets::read_rows(&self.lists_path).await?;
        Ok(rows
            .into_iter()
            .map(|row| ListEntry {
                category: row.category,
                value: row.value,
                active: row.active,
            })
            .collect())
    }

    async fn set_lists(&self, entries: &[ListEntry]) -> Result<(), AppError> {
        let rows: Vec<ListRow> = entries
            .iter()
            .map(|entry| ListRow {
                category: entry.category.clone(),
                value: entry.value.clone(),
                active: entry.active,
            })
            .collect();
        sheets::write_rows(&self.lists_path, &rows).await
    }
}
