//! Error types for the assessment form builder
//!
//! Tree edits, settings changes and preview interactions never fail: a stale
//! id is a no-op. Errors only come out of value-object construction, JSON
//! import/export, configuration loading and the save port.

use thiserror::Error;

use crate::ports::outbound::RepositoryError;

/// Assessment form builder error type
#[derive(Error, Debug)]
pub enum FormsError {
    /// A select field was given no options
    #[error("select field requires at least one option")]
    EmptySelectOptions,

    /// File type does not look like an extension
    #[error("invalid file type: {0:?} (expected a leading '.')")]
    InvalidFileType(String),

    /// Imported document breaks a structural invariant
    #[error("invalid form document: {0}")]
    InvalidDocument(String),

    /// JSON (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be parsed
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Save/load collaborator failed
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result type for the assessment form builder
pub type FormsResult<T> = Result<T, FormsError>;
