use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    /// Directory holding the sheet files (events.csv, trainers.csv, ...).
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    /// First-run admin account, created only when the Users sheet is empty.
    pub seed_admin_email: String,
    pub seed_admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            backup_dir: env::var("BACKUP_DIR")
                .unwrap_or_else(|_| "./backups".to_string())
                .into(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER")
                .unwrap_or_else(|_| "https://scheduler.internal.local".to_string()),
            seed_admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            seed_admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "ChangeMe123!".to_string()),
        }
    }
}
