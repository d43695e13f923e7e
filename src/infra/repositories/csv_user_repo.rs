use crate::domain::models::user::{Role, UserAccount};
use crate::domain::ports::UserRepository;
use crate::error::AppError;
use crate::infra::repositories::sheets;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const USERS_SHEET: &str = "users.csv";

#[derive(Serialize, Deserialize)]
struct UserRow {
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Role")]
    role: String,
    #[serde(rename = "TrainerName")]
    trainer_name: String,
    #[serde(rename = "Active")]
    active: bool,
    #[serde(rename = "PasswordHash")]
    password_hash: String,
}

impl UserRow {
    fn from_account(user: &UserAccount) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            trainer_name: user.trainer_name.clone().unwrap_or_default(),
            active: user.active,
            password_hash: user.password_hash.clone(),
        }
    }

    fn into_account(self) -> Result<UserAccount, AppError> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            AppError::Validation(format!("Unknown role in users sheet: {}", self.role))
        })?;
        let trainer_name = {
            let trimmed = self.trainer_name.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        Ok(UserAccount {
            email: self.email.to_lowercase(),
            role,
            trainer_name,
            active: self.active,
            password_hash: self.password_hash,
        })
    }
}

pub struct CsvUserRepo {
    path: PathBuf,
}

impl CsvUserRepo {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(USERS_SHEET),
        }
    }

    async fn load(&self) -> Result<Vec<UserAccount>, AppError> {
        let rows: Vec<UserRow> = sheets::read_rows(&self.path).await?;
        rows.into_iter().map(UserRow::into_account).collect()
    }

    async fn store(&self, users: &[UserAccount]) -> Result<(), AppError> {
        let rows: Vec<UserRow> = users.iter().map(UserRow::from_account).collect();
        sheets::write_rows(&self.path, &rows).await
    }
}

#[async_trait]
impl UserRepository for CsvUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let needle = email.trim().to_lowercase();
        Ok(self.load().await?.into_iter().find(|u| u.email == needle))
    }

    async fn list(&self) -> Result<Vec<UserAccount>, AppError> {
        self.load().await
    }

    async fn create(&self, user: &UserAccount) -> Result<UserAccount, AppError> {
        let mut users = self.load().await?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "An account for {} already exists",
                user.email
            )));
        }
        users.push(user.clone());
        self.store(&users).await?;
        Ok(user.clone())
    }

    async fn update(&self, user: &UserAccount) -> Result<UserAccount, AppError> {
        let mut users = self.load().await?;
        let existing = users
            .iter_mut()
            .find(|u| u.email == user.email)
            .ok_or_else(|| AppError::NotFound(format!("No account for {}", user.email)))?;
        *existing = user.clone();
        self.store(&users).await?;
        Ok(user.clone())
    }
}
