pub mod csv_audit_repo;
pub mod csv_event_repo;
pub mod csv_settings_repo;
pub mod csv_trainer_repo;
pub mod csv_user_repo;
pub mod sheets;
