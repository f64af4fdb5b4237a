//! In-memory repository implementation (for testing and development)

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::aggregates::FormDocument;
use crate::domain::value_objects::FormId;
use crate::ports::outbound::{FormRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: RwLock<HashMap<FormId, FormDocument>>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.read().is_empty()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn save(&self, doc: &FormDocument) -> Result<(), RepositoryError> {
        self.forms.write().insert(doc.id().clone(), doc.clone());
        Ok(())
    }

    async fn load(&self, id: &FormId) -> Result<Option<FormDocument>, RepositoryError> {
        Ok(self.forms.read().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<FormId>, RepositoryError> {
        let mut ids: Vec<_> = self.forms.read().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
