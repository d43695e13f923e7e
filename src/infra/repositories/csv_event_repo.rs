use crate::domain::models::event::{ActionKind, EventRecord, Scope};
use crate::domain::ports::EventStore;
use crate::error::AppError;
use crate::infra::repositories::sheets;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const EVENTS_SHEET: &str = "events.csv";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Raw sheet row. Column names match the historical workbook layout; all
/// typed fields are serialized to strings here and nowhere else.
#[derive(Serialize, Deserialize)]
struct EventRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    event_type: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Client")]
    client: String,
    #[serde(rename = "Course/Description")]
    description: String,
    #[serde(rename = "Trainer Calendar")]
    trainers: String,
    #[serde(rename = "Medium")]
    medium: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Billing")]
    billing: String,
    #[serde(rename = "Invoiced")]
    invoiced: String,
    #[serde(rename = "Notes")]
    notes: String,
    #[serde(rename = "Date Modified")]
    modified_at: String,
    #[serde(rename = "Modified By")]
    modified_by: String,
    #[serde(rename = "Action Type")]
    action: String,
    #[serde(rename = "Is Marked")]
    is_marked: String,
    #[serde(rename = "Marked For")]
    marked_for: String,
}

impl EventRow {
    fn from_record(record: &EventRecord) -> Self {
        Self {
            title: record.title.clone(),
            id: record.id.clone(),
            date: record.date.format(DATE_FORMAT).to_string(),
            event_type: record.event_type.clone(),
            status: record.status.clone(),
            source: record.source.clone(),
            client: record.client.clone(),
            description: record.description.clone(),
            trainers: record.trainers.join(", "),
            medium: record.medium.clone(),
            location: record.location.clone(),
            billing: record.billing.clone(),
            invoiced: if record.invoiced { "Yes" } else { "No" }.to_string(),
            notes: record.notes.clone(),
            modified_at: record.modified_at.format(TIMESTAMP_FORMAT).to_string(),
            modified_by: record.modified_by.clone(),
            action: record.action.as_str().to_string(),
            is_marked: if record.is_marked { "True" } else { "False" }.to_string(),
            marked_for: record
                .marked_for
                .as_ref()
                .map(|scope| scope.to_string())
                .unwrap_or_default(),
        }
    }

    fn into_record(self) -> Result<EventRecord, AppError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| AppError::Validation(format!("Corrupt date in events sheet: {}", self.date)))?;
        let modified_at = NaiveDateTime::parse_from_str(self.modified_at.trim(), TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(|_| Utc::now());
        let trainers: Vec<String> = self
            .trainers
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let is_marked = parse_flag(&self.is_marked);

        Ok(EventRecord {
            id: self.id,
            date,
            event_type: self.event_type,
            status: self.status,
            source: self.source,
            client: self.client,
            description: self.description,
            trainers,
            medium: self.medium,
            location: self.location,
            billing: self.billing,
            invoiced: parse_flag(&self.invoiced),
            notes: self.notes,
            modified_at,
            modified_by: self.modified_by,
            action: ActionKind::parse(&self.action).unwrap_or(ActionKind::Created),
            is_marked,
            marked_for: if is_marked {
                Scope::parse(&self.marked_for)
            } else {
                None
            },
            title: self.title,
        })
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1"
    )
}

pub struct CsvEventStore {
    path: PathBuf,
}

impl CsvEventStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(EVENTS_SHEET),
        }
    }
}

#[async_trait]
impl EventStore for CsvEventStore {
    async fn load_snapshot(&self) -> Result<Vec<EventRecord>, AppError> {
        let rows: Vec<EventRow> = sheets::read_rows(&self.path).await?;
        rows.into_iter().map(EventRow::into_record).collect()
    }

    async fn save_snapshot(&self, records: &[EventRecord]) -> Result<(), AppError> {
        let rows: Vec<EventRow> = records.iter().map(EventRow::from_record).collect();
        sheets::write_rows(&self.path, &rows).await
    }
}
