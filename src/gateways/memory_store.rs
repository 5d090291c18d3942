use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::{most_recent, SavedRecord, DEFAULT_LIST_LIMIT};
use crate::error::PersistenceError;
use crate::gateways::traits::PersistenceGateway;
use crate::models::{PropertyAttributes, SavedDescription};

/// Process-local store, mainly for tests and offline runs
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<Vec<SavedRecord>>,
    limit: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIST_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            limit,
        }
    }

    /// Every stored record, in insertion order
    pub async fn records(&self) -> Vec<SavedRecord> {
        self.records.lock().await.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryStore {
    async fn list(&self) -> Result<Vec<SavedDescription>, PersistenceError> {
        let records = self.records.lock().await;
        let descriptions = records.iter().map(|r| r.description.clone()).collect();
        Ok(most_recent(descriptions, self.limit))
    }

    async fn save(
        &self,
        title: &str,
        content: &str,
        attributes: &PropertyAttributes,
    ) -> Result<SavedDescription, PersistenceError> {
        let record = SavedRecord::new(title, content, attributes);
        let saved = record.description.clone();
        self.records.lock().await.push(record);
        info!(id = %saved.id, title = %saved.title, "Saved description in memory");
        Ok(saved)
    }
}
