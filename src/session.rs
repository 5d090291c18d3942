//! Session context: owns one version history and drives generation, editing,
//! saving and the derived views for it.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::analysis::{self, Comparison, KeywordReport};
use crate::error::{Error, GenerationError, PersistenceError, ServiceError, StateError};
use crate::export::{self, ExportFormat, ExportedFile};
use crate::gateways::{GenerationGateway, PersistenceGateway};
use crate::history::VersionHistory;
use crate::models::{Channel, DescriptionVersion, PropertyAttributes, SavedDescription};
use crate::prompt::{self, GenerationRequest};

/// One user's editing session.
///
/// The history lives exactly as long as the session. Generation borrows the
/// session mutably, so a second request cannot start while one is pending.
pub struct Session {
    generator: Arc<dyn GenerationGateway>,
    store: Arc<dyn PersistenceGateway>,
    history: VersionHistory,
    attributes: PropertyAttributes,
    channel: Option<Channel>,
}

impl Session {
    pub fn new(generator: Arc<dyn GenerationGateway>, store: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            generator,
            store,
            history: VersionHistory::new(),
            attributes: PropertyAttributes::default(),
            channel: None,
        }
    }

    /// Build the request, call the generator and record the result as a new
    /// generator-authored version.
    ///
    /// On failure nothing is recorded; retrying is up to the caller.
    pub async fn generate(
        &mut self,
        attributes: PropertyAttributes,
        channel: Option<Channel>,
    ) -> Result<&DescriptionVersion, GenerationError> {
        let request = prompt::build(&attributes, channel);
        info!(
            "Generating description for '{}' via {}",
            request.title(),
            self.generator.backend_name()
        );

        let content = match self.generator.generate(&request).await {
            Ok(content) if content.trim().is_empty() => {
                warn!("Generator returned blank content");
                return Err(ServiceError::EmptyResult.into());
            }
            Ok(content) => content,
            Err(e) => {
                warn!("Generation failed: {}", e);
                return Err(e.into());
            }
        };

        self.attributes = attributes;
        self.channel = channel;
        Ok(self.history.create(content))
    }

    /// The request that [`Session::generate`] would send
    pub fn preview_request(
        attributes: &PropertyAttributes,
        channel: Option<Channel>,
    ) -> GenerationRequest {
        prompt::build(attributes, channel)
    }

    /// Record edited content as a new human-authored version
    pub fn edit(&mut self, content: impl Into<String>) -> &DescriptionVersion {
        self.history.edit(content)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn select(&mut self, index: usize) -> Result<&DescriptionVersion, StateError> {
        self.history.select(index)
    }

    pub fn delete_version(&mut self, id: u64) -> Result<DescriptionVersion, StateError> {
        self.history.delete(id)
    }

    pub fn annotate(&mut self, id: u64, note: impl Into<String>) -> Result<(), StateError> {
        self.history.annotate(id, note)
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    pub fn current(&self) -> Option<&DescriptionVersion> {
        self.history.current()
    }

    /// Attributes of the last successful generation
    pub fn attributes(&self) -> &PropertyAttributes {
        &self.attributes
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    /// Default title for saving: property type and location
    pub fn title(&self) -> String {
        prompt::synthesize_title(&self.attributes)
    }

    pub fn keywords(&self) -> Option<KeywordReport> {
        self.current().map(|v| analysis::analyze(v.content()))
    }

    pub fn compare(&self) -> Option<Comparison> {
        self.history.compare_original_with_current()
    }

    pub fn export(&self, format: ExportFormat) -> Option<ExportedFile> {
        self.current().map(|v| export::export_version(v, format))
    }

    pub fn print_document(&self) -> Option<String> {
        self.current().map(|v| export::print_document(v.content()))
    }

    /// `<origin>/property-description/<versionId>` for the current version
    pub fn share_link(&self, origin: &str) -> Option<String> {
        self.current().map(|v| share_link(origin, v.id()))
    }

    /// Persist the current version under `title`.
    ///
    /// An empty history is a [`StateError`] and never reaches the store. A
    /// store failure leaves the in-memory history untouched.
    pub async fn save_current(&self, title: &str) -> Result<SavedDescription, Error> {
        let version = self.current().ok_or(StateError::EmptyHistory)?;

        match self.store.save(title, version.content(), &self.attributes).await {
            Ok(saved) => {
                info!(version = version.id(), id = %saved.id, "Saved current version");
                Ok(saved)
            }
            Err(e) => {
                error!("Failed to save description: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn saved_descriptions(&self) -> Result<Vec<SavedDescription>, PersistenceError> {
        self.store.list().await
    }
}

pub fn share_link(origin: &str, version_id: u64) -> String {
    format!(
        "{}/property-description/{}",
        origin.trim_end_matches('/'),
        version_id
    )
}
