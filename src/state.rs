use crate::config::Config;
use crate::domain::ports::{
    AuditLog, EventStore, SettingsRepository, TrainerRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::infra::backup::BackupManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub events: Arc<dyn EventStore>,
    pub trainers: Arc<dyn TrainerRepository>,
    pub users: Arc<dyn UserRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub audit: Arc<dyn AuditLog>,
    pub auth_service: Arc<AuthService>,
    pub backups: Arc<BackupManager>,
}
