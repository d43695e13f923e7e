use crate::domain::models::trainer::Trainer;
use crate::domain::ports::TrainerRepository;
use crate::error::AppError;
use crate::infra::repositories::sheets;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const TRAINERS_SHEET: &str = "trainers.csv";

#[derive(Serialize, Deserialize)]
struct TrainerRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Color")]
    color: String,
    #[serde(rename = "Active")]
    active: bool,
}

pub struct CsvTrainerRepo {
    path: PathBuf,
}

impl CsvTrainerRepo {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(TRAINERS_SHEET),
        }
    }

    async fn load(&self) -> Result<Vec<Trainer>, AppError> {
        let rows: Vec<TrainerRow> = sheets::read_rows(&self.path).await?;
        Ok(rows
            .into_iter()
            .map(|row| Trainer {
                name: row.name,
                color: row.color,
                active: row.active,
            })
            .collect())
    }

    async fn store(&self, trainers: &[Trainer]) -> Result<(), AppError> {
        let rows: Vec<TrainerRow> = trainers
            .iter()
            .map(|t| TrainerRow {
                name: t.name.clone(),
                color: t.color.clone(),
                active: t.active,
            })
            .collect();
        sheets::write_rows(&self.path, &rows).await
    }
}

#[async_trait]
impl TrainerRepository for CsvTrainerRepo {
    async fn list(&self) -> Result<Vec<Trainer>, AppError> {
        self.load().await
    }

    async fn active_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|t| t.active)
            .map(|t| t.name)
            .collect())
    }

    async fn upsert(&self, trainer: &Trainer) -> Result<Trainer, AppError> {
        let mut trainers = self.load().await?;
        match trainers.iter_mut().find(|t| t.name == trainer.name) {
            Some(existing) => *existing = trainer.clone(),
            None => trainers.push(trainer.clone()),
        }
        self.store(&trainers).await?;
        Ok(trainer.clone())
    }
}
