use std::io;

use thiserror::Error;

/// Rejected operation on a version history.
///
/// These never indicate corruption: the history is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("version index {index} is out of range (history has {len} versions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("version {id} is the only remaining version and cannot be deleted")]
    LastVersion { id: u64 },

    #[error("no version with id {id}")]
    NotFound { id: u64 },

    #[error("history has no versions yet")]
    EmptyHistory,
}

/// Failure reported by a generation service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("generation service timed out")]
    Timeout,

    #[error("generation service rate limit reached")]
    RateLimited,

    #[error("generation service rejected the credentials")]
    InvalidCredentials,

    #[error("generation service returned an empty description")]
    EmptyResult,

    /// Transport or HTTP failure that is none of the above.
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
}

/// Generation attempt failed; no version was created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("description generation failed: {source}")]
pub struct GenerationError {
    #[from]
    pub source: ServiceError,
}

impl GenerationError {
    pub fn kind(&self) -> &ServiceError {
        &self.source
    }
}

/// Saving or listing descriptions failed; in-memory versions are unaffected.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to (de)serialize saved description: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {details}")]
    Parse { path: String, details: String },

    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("{0}")]
    Invalid(String),
}

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
