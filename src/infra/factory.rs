use crate::config::Config;
use crate::domain::models::settings::{BlockingPolicy, EventDefaults, ListEntry};
use crate::domain::models::trainer::Trainer;
use crate::domain::models::user::{Role, UserAccount};
use crate::domain::services::auth_service::AuthService;
use crate::infra::backup::BackupManager;
use crate::infra::repositories::{
    csv_audit_repo::CsvAuditLog, csv_event_repo::CsvEventStore,
    csv_settings_repo::CsvSettingsRepo, csv_trainer_repo::CsvTrainerRepo,
    csv_user_repo::CsvUserRepo,
};
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn bootstrap_state(config: &Config) -> AppState {
    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .expect("Failed to create data directory");
    tokio::fs::create_dir_all(&config.backup_dir)
        .await
        .expect("Failed to create backup directory");

    let events = Arc::new(CsvEventStore::new(&config.data_dir));
    let trainers = Arc::new(CsvTrainerRepo::new(&config.data_dir));
    let users = Arc::new(CsvUserRepo::new(&config.data_dir));
    let settings = Arc::new(CsvSettingsRepo::new(&config.data_dir));
    let audit = Arc::new(CsvAuditLog::new(&config.data_dir));

    let state = AppState {
        config: config.clone(),
        events,
        trainers,
        users,
        settings,
        audit,
        auth_service: Arc::new(AuthService::new(config)),
        backups: Arc::new(BackupManager::new(
            config.data_dir.clone(),
            config.backup_dir.clone(),
        )),
    };

    seed_defaults_if_empty(&state).await;
    state
}

/// First-run seeding, mirroring the sheets an empty deployment needs: one
/// admin account, the default trainer roster, the option lists, the three
/// blocking rules and the form defaults.
async fn seed_defaults_if_empty(state: &AppState) {
    let users = state.users.list().await.expect("Failed to read users sheet");
    if users.is_empty() {
        let password_hash = AuthService::hash_password(&state.config.seed_admin_password)
            .expect("Failed to hash seed admin password");
        state
            .users
            .create(&UserAccount {
                email: state.config.seed_admin_email.to_lowercase(),
                role: Role::Admin,
                trainer_name: None,
                active: true,
                password_hash,
            })
            .await
            .expect("Failed to seed admin account");
        info!("Seeded admin account {}", state.config.seed_admin_email);
    }

    let trainers = state
        .trainers
        .list()
        .await
        .expect("Failed to read trainers sheet");
    if trainers.is_empty() {
        for (name, color) in [
            ("Dom", "#E74E25"),
            ("Andrew", "#4ECDC4"),
            ("Dale", "#4A90E2"),
            ("Jack", "#FFD93D"),
        ] {
            state
                .trainers
                .upsert(&Trainer {
                    name: name.to_string(),
                    color: color.to_string(),
                    active: true,
                })
                .await
                .expect("Failed to seed trainers");
        }
    }

    let lists = state
        .settings
        .lists()
        .await
        .expect("Failed to read lists sheet");
    if lists.is_empty() {
        let mut entries = Vec::new();
        for value in ["Syd", "Mel", "Bne", "SG", "Msia", "Global"] {
            entries.push(seed_entry("Locations", value));
        }
        for value in ["EQS", "CCE", "CTD"] {
            entries.push(seed_entry("Sources", value));
        }
        for value in ["Offered", "Tentative", "Confirmed"] {
            entries.push(seed_entry("Statuses", value));
        }
        for value in ["F2F", "Online"] {
            entries.push(seed_entry("Mediums", value));
        }
        for value in ["W", "C", "M"] {
            entries.push(seed_entry("Types", value));
        }
        state
            .settings
            .set_lists(&entries)
            .await
            .expect("Failed to seed option lists");
    }

    // Writing the defaults back persists them even when the sheets were
    // missing, so later edits start from a complete file.
    let policy = state
        .settings
        .policy()
        .await
        .unwrap_or_else(|_| BlockingPolicy::default());
    state
        .settings
        .set_policy(&policy)
        .await
        .expect("Failed to seed rules sheet");

    let defaults = state
        .settings
        .defaults()
        .await
        .unwrap_or_else(|_| EventDefaults::default());
    state
        .settings
        .set_defaults(&defaults)
        .await
        .expect("Failed to seed defaults sheet");
}

fn seed_entry(category: &str, value: &str) -> ListEntry {
    ListEntry {
        category: category.to_string(),
        value: value.to_string(),
        active: true,
    }
}
