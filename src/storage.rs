use crate::models::ChallengeProgress;
use async_trait::async_trait;
use std::{collections::HashMap, env, io, path::PathBuf, sync::Arc};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{error, info};

pub const PROGRESS_KEY: &str = "challenge_progress";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(#[source] io::Error),
    #[error("storage write failed: {0}")]
    Write(#[source] io::Error),
    #[error("stored progress is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode progress: {0}")]
    Encode(#[source] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("APP_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from("data")
}

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                error!("failed to read data file for {key}: {err}");
                Err(StoreError::Read(err))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Stage then rename, so a failed write leaves the prior blob readable.
        let path = self.path_for(key);
        let staged = path.with_extension("json.tmp");
        fs::write(&staged, value).await.map_err(StoreError::Write)?;
        fs::rename(&staged, &path).await.map_err(StoreError::Write)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KvStore>,
}

impl ProgressStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Corrupt or unreadable data is an error, never an empty aggregate.
    pub async fn load(&self) -> Result<Option<ChallengeProgress>, StoreError> {
        match self.kv.get(PROGRESS_KEY).await? {
            Some(raw) => {
                let progress = serde_json::from_str(&raw).map_err(|err| {
                    error!("failed to parse stored progress: {err}");
                    StoreError::Corrupt(err)
                })?;
                Ok(Some(progress))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, progress: &ChallengeProgress) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(progress).map_err(StoreError::Encode)?;
        self.kv.set(PROGRESS_KEY, &raw).await
    }

    pub async fn initialize_if_absent(
        &self,
        today: &str,
    ) -> Result<ChallengeProgress, StoreError> {
        if let Some(existing) = self.load().await? {
            return Ok(existing);
        }

        let progress = ChallengeProgress::new(today);
        self.save(&progress).await?;
        Ok(progress)
    }

    /// The only operation that discards recorded days.
    pub async fn reset(&self) -> Result<ChallengeProgress, StoreError> {
        let progress = ChallengeProgress::empty();
        self.save(&progress).await?;
        info!("challenge progress reset, all daily records discarded");
        Ok(progress)
    }
}
