use async_trait::async_trait;

use crate::error::{PersistenceError, ServiceError};
use crate::models::{PropertyAttributes, SavedDescription};
use crate::prompt::GenerationRequest;

/// Text generation service that turns a request into description content.
///
/// Implementations do not retry; every error ends the current attempt.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generate description content. Blank output is [`ServiceError::EmptyResult`].
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ServiceError>;

    /// Get the name of the generation backend
    fn backend_name(&self) -> &'static str;
}

/// Durable store for descriptions the user chose to keep
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Most recently updated first, at most the store's list limit
    async fn list(&self) -> Result<Vec<SavedDescription>, PersistenceError>;

    /// Create a new record; timestamps are assigned by the store
    async fn save(
        &self,
        title: &str,
        content: &str,
        attributes: &PropertyAttributes,
    ) -> Result<SavedDescription, PersistenceError>;
}
