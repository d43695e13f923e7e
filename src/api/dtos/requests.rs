use crate::domain::models::event::EventDraft;
use crate::domain::models::user::Role;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Body for create and edit. A missing `end_date` means a single day. The
/// trainer list may carry the "All" wildcard, which the handler resolves to
/// the active roster before the rule engine sees it.
#[derive(Deserialize)]
pub struct EventPayload {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub event_type: String,
    pub status: String,
    pub source: String,
    pub client: String,
    #[serde(default)]
    pub description: String,
    pub trainers: Vec<String>,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub billing: String,
    #[serde(default)]
    pub invoiced: bool,
    #[serde(default)]
    pub notes: String,
}

impl EventPayload {
    pub fn end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Builds the shared draft with an already-resolved trainer list.
    pub fn draft_with(&self, trainers: Vec<String>) -> EventDraft {
        EventDraft {
            event_type: self.event_type.clone(),
            status: self.status.clone(),
            source: self.source.clone(),
            client: self.client.clone(),
            description: self.description.clone(),
            trainers,
            medium: self.medium.clone(),
            location: self.location.clone(),
            billing: self.billing.clone(),
            invoiced: self.invoiced,
            notes: self.notes.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct DuplicateRequest {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Field subset applied across all selected ids; None leaves a field as-is.
#[derive(Deserialize)]
pub struct BulkUpdateRequest {
    pub ids: Vec<String>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub client: Option<String>,
    pub description: Option<String>,
    pub trainers: Option<Vec<String>>,
    pub medium: Option<String>,
    pub location: Option<String>,
    pub billing: Option<String>,
    pub invoiced: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Body for the mark path. `trainers` carries either the "All" wildcard or
/// an explicit selection; an empty selection is rejected by the rule engine.
#[derive(Deserialize)]
pub struct MarkRequest {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub trainers: Vec<String>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertTrainerRequest {
    pub name: String,
    pub color: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub trainer_name: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub trainer_name: Option<String>,
    pub active: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// Query filters for listing and export. `client` is a case-insensitive
/// substring; `trainer` uses the exact token-match predicate.
#[derive(Deserialize, Default)]
pub struct EventFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub trainer: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub client: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CalendarQuery {
    pub trainer: Option<String>,
}
