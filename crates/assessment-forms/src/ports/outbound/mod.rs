//! Outbound ports
//!
//! Hexagonal architecture: the storage behind "Save" is an external
//! collaborator and must implement this trait.

use async_trait::async_trait;

use crate::domain::aggregates::FormDocument;
use crate::domain::value_objects::FormId;

/// Form document repository port
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Save document (insert or replace)
    async fn save(&self, doc: &FormDocument) -> Result<(), RepositoryError>;

    /// Load document by id
    async fn load(&self, id: &FormId) -> Result<Option<FormDocument>, RepositoryError>;

    /// List stored document ids
    async fn list(&self) -> Result<Vec<FormId>, RepositoryError>;
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    StorageError(String),
}
