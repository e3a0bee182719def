//! In-memory model repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::model::{
    select_models_to_prune, Model, ModelId, ModelQuery, ModelRepository, PruneOptions,
};

/// In-memory implementation of ModelRepository for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemoryModelRepository {
    models: Arc<RwLock<HashMap<String, Model>>>,
}

impl InMemoryModelRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with models
    pub fn with_models(models: impl IntoIterator<Item = Model>) -> Self {
        let map = models
            .into_iter()
            .map(|m| (m.id().to_string(), m))
            .collect();

        Self {
            models: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored models, all languages included
    pub async fn len(&self) -> usize {
        self.models.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.models.read().await.is_empty()
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn initialize(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn teardown(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_model(&self, id: &ModelId) -> Result<Option<Model>, DomainError> {
        let models = self.models.read().await;
        Ok(models.get(&id.to_string()).cloned())
    }

    async fn get_latest_model(&self, query: &ModelQuery) -> Result<Option<Model>, DomainError> {
        let models = self.models.read().await;
        Ok(models
            .values()
            .filter(|m| query.matches(m))
            .max_by_key(|m| (m.created_at(), m.id().to_string()))
            .cloned())
    }

    async fn save_model(&self, model: &Model) -> Result<(), DomainError> {
        let mut models = self.models.write().await;
        models.insert(model.id().to_string(), model.clone());
        Ok(())
    }

    async fn list_models(&self, query: &ModelQuery) -> Result<Vec<Model>, DomainError> {
        let models = self.models.read().await;
        Ok(models.values().filter(|m| query.matches(m)).cloned().collect())
    }

    async fn prune_models(
        &self,
        models: Vec<Model>,
        options: &PruneOptions,
    ) -> Result<Vec<ModelId>, DomainError> {
        let to_delete = select_models_to_prune(&models, options);
        if to_delete.is_empty() {
            return Ok(to_delete);
        }

        let mut stored = self.models.write().await;
        for id in &to_delete {
            stored.remove(&id.to_string());
            debug!(model_id = %id, "Pruned model");
        }

        Ok(to_delete)
    }
}
