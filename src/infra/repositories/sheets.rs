//! Shared plumbing for the CSV sheet files: a sidecar lock file with a
//! bounded retry loop, and whole-file atomic replacement via a temp sibling
//! plus rename. Readers only ever observe a complete snapshot.

use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const LOCK_ATTEMPTS: u32 = 10;
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Exclusive write lock on one sheet, held for the duration of a write.
/// Created with create-new semantics; the file's existence is the lock.
pub struct SheetLock {
    path: PathBuf,
}

impl SheetLock {
    pub async fn acquire(sheet_path: &Path) -> Result<Self, AppError> {
        let path = lock_path(sheet_path);
        for attempt in 0..LOCK_ATTEMPTS {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    if attempt + 1 < LOCK_ATTEMPTS {
                        tokio::time::sleep(LOCK_RETRY_DELAY).await;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
        warn!("Could not acquire lock for {:?}", sheet_path);
        Err(AppError::Conflict(
            "The data file is locked by another writer; try again".to_string(),
        ))
    }
}

impl Drop for SheetLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn lock_path(sheet_path: &Path) -> PathBuf {
    let mut os = sheet_path.as_os_str().to_os_string();
    os.push(".lock");
    PathBuf::from(os)
}

/// Reads all rows of a sheet. A missing sheet is an empty record set.
pub async fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Replaces a sheet with the given rows: serialize in memory, write a temp
/// sibling, rename over the live file. The lock covers temp file and rename
/// so concurrent writers serialize at the whole-file level.
pub async fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    let _lock = SheetLock::acquire(path).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| {
        tracing::error!("CSV buffer flush failed: {}", e);
        AppError::Internal
    })?;

    let tmp_path = {
        let mut os = path.as_os_str().to_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    };
    tokio::fs::write(&tmp_path, &bytes).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}
