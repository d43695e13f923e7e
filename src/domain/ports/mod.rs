use crate::domain::models::{
    audit::AuditEntry,
    event::EventRecord,
    settings::{BlockingPolicy, EventDefaults, ListEntry},
    trainer::Trainer,
    user::UserAccount,
};
use crate::error::AppError;
use async_trait::async_trait;

/// The Data Store boundary for event records. Implementations must replace
/// the whole record set atomically on save; the rule engine never performs
/// partial writes.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn load_snapshot(&self) -> Result<Vec<EventRecord>, AppError>;
    async fn save_snapshot(&self, records: &[EventRecord]) -> Result<(), AppError>;
}

#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Trainer>, AppError>;
    /// Names of active trainers, in sheet order; resolves the "All" wildcard.
    async fn active_names(&self) -> Result<Vec<String>, AppError>;
    async fn upsert(&self, trainer: &Trainer) -> Result<Trainer, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError>;
    async fn list(&self) -> Result<Vec<UserAccount>, AppError>;
    async fn create(&self, user: &UserAccount) -> Result<UserAccount, AppError>;
    async fn update(&self, user: &UserAccount) -> Result<UserAccount, AppError>;
}

/// The Settings Provider boundary: policy toggles, form defaults and the
/// configurable option lists.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn policy(&self) -> Result<BlockingPolicy, AppError>;
    async fn set_policy(&self, policy: &BlockingPolicy) -> Result<(), AppError>;
    async fn defaults(&self) -> Result<EventDefaults, AppError>;
    async fn set_defaults(&self, defaults: &EventDefaults) -> Result<(), AppError>;
    async fn lists(&self) -> Result<Vec<ListEntry>, AppError>;
    async fn set_lists(&self, entries: &[ListEntry]) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, user: &str, action: &str, details: &str) -> Result<(), AppError>;
    async fn list(&self) -> Result<Vec<AuditEntry>, AppError>;
}
