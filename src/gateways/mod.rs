pub mod file_store;
pub mod memory_store;
pub mod openai;
pub mod traits;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use openai::OpenAiGateway;
pub use traits::{GenerationGateway, PersistenceGateway};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{PropertyAttributes, SavedDescription};

/// Default cap on [`PersistenceGateway::list`] results
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Stored form of a saved description, including the attributes it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
    #[serde(flatten)]
    pub description: SavedDescription,
    #[serde(default)]
    pub attributes: PropertyAttributes,
}

impl SavedRecord {
    pub(crate) fn new(title: &str, content: &str, attributes: &PropertyAttributes) -> Self {
        let now = Utc::now();
        Self {
            description: SavedDescription {
                id: uuid::Uuid::new_v4().to_string(),
                title: title.to_string(),
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            },
            attributes: attributes.clone(),
        }
    }
}

/// Newest `updated_at` first, truncated to `limit`
pub(crate) fn most_recent(mut records: Vec<SavedDescription>, limit: usize) -> Vec<SavedDescription> {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    records.truncate(limit);
    records
}
