//! Manual backup and restore of the sheet-file data directory. A backup is a
//! timestamped subdirectory holding a copy of every sheet; restore copies a
//! backup's sheets back over the live data directory after snapshotting the
//! current state first.

use crate::error::AppError;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub created: DateTime<Utc>,
    pub size_kb: u64,
}

pub struct BackupManager {
    data_dir: PathBuf,
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(data_dir: PathBuf, backup_dir: PathBuf) -> Self {
        Self {
            data_dir,
            backup_dir,
        }
    }

    /// Copies every sheet into a new `backup_YYYYmmdd_HHMMSS` directory and
    /// returns its name.
    pub async fn create(&self) -> Result<String, AppError> {
        let base = format!("backup_{}", Local::now().format("%Y%m%d_%H%M%S"));
        // Second-resolution names collide when a restore snapshots right
        // after a manual backup; suffix until free.
        let mut name = base.clone();
        let mut attempt = 1;
        while tokio::fs::try_exists(self.backup_dir.join(&name)).await? {
            attempt += 1;
            name = format!("{base}_{attempt}");
        }
        let target = self.backup_dir.join(&name);
        tokio::fs::create_dir_all(&target).await?;
        copy_sheets(&self.data_dir, &target).await?;
        info!("Created backup {}", name);
        Ok(name)
    }

    /// All backups, newest first.
    pub async fn list(&self) -> Result<Vec<BackupInfo>, AppError> {
        if !tokio::fs::try_exists(&self.backup_dir).await? {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.backup_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !file_type.is_dir() || !name.starts_with("backup_") {
                continue;
            }
            let created = entry
                .metadata()
                .await?
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            backups.push(BackupInfo {
                size_kb: dir_size(&entry.path()).await? / 1024,
                name,
                created,
            });
        }
        backups.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(backups)
    }

    /// Restores a backup over the live data directory. The current state is
    /// backed up first so a bad restore is itself recoverable.
    pub async fn restore(&self, name: &str) -> Result<String, AppError> {
        let source = self.resolve(name)?;
        if !tokio::fs::try_exists(&source).await? {
            return Err(AppError::NotFound(format!("Backup {name} not found")));
        }
        let safety = self.create().await?;
        copy_sheets(&source, &self.data_dir).await?;
        info!("Restored backup {} (current state saved as {})", name, safety);
        Ok(safety)
    }

    pub async fn delete(&self, name: &str) -> Result<(), AppError> {
        let target = self.resolve(name)?;
        if !tokio::fs::try_exists(&target).await? {
            return Err(AppError::NotFound(format!("Backup {name} not found")));
        }
        tokio::fs::remove_dir_all(&target).await?;
        Ok(())
    }

    /// Backup names come from URLs; reject anything that could escape the
    /// backup directory.
    fn resolve(&self, name: &str) -> Result<PathBuf, AppError> {
        if name.is_empty()
            || !name.starts_with("backup_")
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(AppError::Validation(format!("Invalid backup name: {name}")));
        }
        Ok(self.backup_dir.join(name))
    }
}

async fn copy_sheets(from: &Path, to: &Path) -> Result<(), AppError> {
    tokio::fs::create_dir_all(to).await?;
    let mut entries = tokio::fs::read_dir(from).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "csv") {
            tokio::fs::copy(&path, to.join(entry.file_name())).await?;
        }
    }
    Ok(())
}

async fn dir_size(dir: &Path) -> Result<u64, AppError> {
    let mut total = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        total += entry.metadata().await?.len();
    }
    Ok(total)
}
