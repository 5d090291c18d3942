//! Per-session, browsable revision history of a description.
//!
//! New versions are prepended and nothing is ever truncated: "undo" and "redo"
//! only move the cursor toward older or newer entries, so every earlier
//! revision stays reachable by [`VersionHistory::select`].

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::compare::{self, Comparison};
use crate::error::StateError;
use crate::models::{Author, DescriptionVersion};

/// Ordered versions, newest first, with a cursor on the current one.
///
/// Invariants once the first version exists: the history is never empty,
/// `0 <= current_index < len`, and ids are never reused.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistory {
    versions: Vec<DescriptionVersion>,
    current_index: usize,
    #[serde(skip)]
    last_id: u64,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record generator output as the newest version and make it current
    pub fn create(&mut self, content: impl Into<String>) -> &DescriptionVersion {
        self.push(content.into(), Author::Generator)
    }

    /// Record a human edit as the newest version and make it current
    pub fn edit(&mut self, content: impl Into<String>) -> &DescriptionVersion {
        self.push(content.into(), Author::Human)
    }

    fn push(&mut self, content: String, author: Author) -> &DescriptionVersion {
        self.last_id += 1;
        let version = DescriptionVersion {
            id: self.last_id,
            content,
            created_at: Utc::now(),
            author,
            annotation: None,
        };
        info!(id = version.id, author = %author, "Created description version");

        self.versions.insert(0, version);
        self.current_index = 0;
        &self.versions[0]
    }

    /// Move the cursor one step toward older versions.
    ///
    /// Returns `false` without moving when the cursor is already on the oldest.
    pub fn undo(&mut self) -> bool {
        if self.current_index + 1 < self.versions.len() {
            self.current_index += 1;
            debug!(index = self.current_index, "Undo");
            true
        } else {
            false
        }
    }

    /// Move the cursor one step toward newer versions.
    ///
    /// Returns `false` without moving when the cursor is already on the newest.
    pub fn redo(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            debug!(index = self.current_index, "Redo");
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.current_index + 1 < self.versions.len()
    }

    pub fn can_redo(&self) -> bool {
        self.current_index > 0
    }

    pub fn select(&mut self, index: usize) -> Result<&DescriptionVersion, StateError> {
        if index >= self.versions.len() {
            warn!(index, len = self.versions.len(), "Rejected version selection");
            return Err(StateError::IndexOutOfRange {
                index,
                len: self.versions.len(),
            });
        }
        self.current_index = index;
        Ok(&self.versions[index])
    }

    /// Remove the version with `id` and reset the cursor to the newest entry.
    ///
    /// The sole remaining version cannot be deleted.
    pub fn delete(&mut self, id: u64) -> Result<DescriptionVersion, StateError> {
        let position = self.position_of(id)?;
        if self.versions.len() == 1 {
            warn!(id, "Rejected deletion of the last remaining version");
            return Err(StateError::LastVersion { id });
        }

        let removed = self.versions.remove(position);
        self.current_index = 0;
        info!(id, remaining = self.versions.len(), "Deleted description version");
        Ok(removed)
    }

    /// Set or replace the free-text note on a version
    pub fn annotate(&mut self, id: u64, note: impl Into<String>) -> Result<(), StateError> {
        let position = self.position_of(id)?;
        self.versions[position].annotation = Some(note.into());
        Ok(())
    }

    fn position_of(&self, id: u64) -> Result<usize, StateError> {
        self.versions
            .iter()
            .position(|v| v.id == id)
            .ok_or(StateError::NotFound { id })
    }

    pub fn current(&self) -> Option<&DescriptionVersion> {
        self.versions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The first version recorded that still exists
    pub fn oldest(&self) -> Option<&DescriptionVersion> {
        self.versions.last()
    }

    pub fn get(&self, id: u64) -> Option<&DescriptionVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Versions newest first
    pub fn versions(&self) -> &[DescriptionVersion] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Oldest version against the current one, as shown in compare mode
    pub fn compare_original_with_current(&self) -> Option<Comparison> {
        Some(compare::compare(self.oldest()?, self.current()?))
    }
}
