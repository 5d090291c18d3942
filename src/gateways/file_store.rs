use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{most_recent, SavedRecord, DEFAULT_LIST_LIMIT};
use crate::error::PersistenceError;
use crate::gateways::traits::PersistenceGateway;
use crate::models::{PropertyAttributes, SavedDescription};

/// One pretty-printed JSON file per saved description, named `<id>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    limit: usize,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_limit(dir, DEFAULT_LIST_LIMIT)
    }

    pub fn with_limit(dir: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            dir: dir.into(),
            limit,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_record(path: &Path) -> Result<SavedRecord, PersistenceError> {
        let json = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileStore {
    async fn list(&self) -> Result<Vec<SavedDescription>, PersistenceError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut descriptions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_record(&path).await {
                Ok(record) => descriptions.push(record.description),
                Err(e) => warn!("Skipping unreadable saved description {}: {}", path.display(), e),
            }
        }

        debug!("Loaded {} saved descriptions from {}", descriptions.len(), self.dir.display());
        Ok(most_recent(descriptions, self.limit))
    }

    async fn save(
        &self,
        title: &str,
        content: &str,
        attributes: &PropertyAttributes,
    ) -> Result<SavedDescription, PersistenceError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let record = SavedRecord::new(title, content, attributes);
        let path = self.dir.join(format!("{}.json", record.description.id));
        let json = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(&path, json).await?;

        info!("💾 Saved description '{}' to {}", title, path.display());
        Ok(record.description)
    }
}
