use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trainer scope of a blocking record: every trainer, or an explicit
/// ordered set of trainer names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Named(Vec<String>),
}

impl Scope {
    /// Parses the sheet representation: the literal "All" (case-insensitive)
    /// or a comma-joined list of names. Empty input is no scope at all.
    pub fn parse(raw: &str) -> Option<Scope> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        if value.eq_ignore_ascii_case("all") {
            return Some(Scope::All);
        }
        let names: Vec<String> = value
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(Scope::Named(names))
        }
    }

    /// Exact token membership, trimmed and case-sensitive. Never a substring
    /// match: "An" must not match a scope containing "Andrew".
    pub fn includes(&self, trainer: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Named(names) => names.iter().any(|name| name == trainer),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::All => write!(f, "All"),
            Scope::Named(names) => write!(f, "{}", names.join(", ")),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Scope::parse(&raw).ok_or_else(|| serde::de::Error::custom("empty trainer scope"))
    }
}

/// How a record last changed, mirrored into the sheet's "Action Type" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Created,
    Modified,
    Duplicated,
    #[serde(rename = "Bulk Modified")]
    BulkModified,
    Marked,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Created => "Created",
            ActionKind::Modified => "Modified",
            ActionKind::Duplicated => "Duplicated",
            ActionKind::BulkModified => "Bulk Modified",
            ActionKind::Marked => "Marked",
        }
    }

    pub fn parse(raw: &str) -> Option<ActionKind> {
        match raw.trim() {
            "Created" => Some(ActionKind::Created),
            "Modified" => Some(ActionKind::Modified),
            "Duplicated" => Some(ActionKind::Duplicated),
            "Bulk Modified" => Some(ActionKind::BulkModified),
            "Marked" => Some(ActionKind::Marked),
            _ => None,
        }
    }
}

/// One calendar day of one scheduled activity, or one blocked-date marker.
/// A multi-day request becomes N independent records; no span entity exists
/// outside the expansion step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub date: NaiveDate,
    pub event_type: String,
    pub status: String,
    pub source: String,
    pub client: String,
    pub description: String,
    /// Resolved trainer names; the "All" wildcard is expanded before a
    /// record is built.
    pub trainers: Vec<String>,
    pub medium: String,
    pub location: String,
    pub billing: String,
    pub invoiced: bool,
    pub notes: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
    pub action: ActionKind,
    pub is_marked: bool,
    /// Scope of a blocking record; always None for plain events.
    pub marked_for: Option<Scope>,
    /// Derived display title; recomputed on every mutation, never hand-edited.
    pub title: String,
}

impl EventRecord {
    pub fn involves_trainer(&self, trainer: &str) -> bool {
        self.trainers.iter().any(|name| name == trainer)
            || self
                .marked_for
                .as_ref()
                .is_some_and(|scope| scope.includes(trainer))
    }
}

/// Shared attributes of a multi-day request, before per-day expansion.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub event_type: String,
    pub status: String,
    pub source: String,
    pub client: String,
    pub description: String,
    /// Must already be resolved: the wildcard expands to the active trainer
    /// list before a draft reaches the rule engine.
    pub trainers: Vec<String>,
    pub medium: String,
    pub location: String,
    pub billing: String,
    pub invoiced: bool,
    pub notes: String,
}

/// Who performed a write and when; applied to every record an operation
/// produces so one logical operation carries one uniform provenance.
#[derive(Debug, Clone)]
pub struct WriteStamp {
    pub actor: String,
    pub at: DateTime<Utc>,
    pub action: ActionKind,
}

impl WriteStamp {
    pub fn new(actor: impl Into<String>, action: ActionKind) -> Self {
        Self {
            actor: actor.into(),
            at: Utc::now(),
            action,
        }
    }
}

/// A single (day, trainer) pair that blocked a strict write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockConflict {
    pub date: NaiveDate,
    pub trainer: String,
}

pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
