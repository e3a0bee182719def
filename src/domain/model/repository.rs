//! Model repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Model, ModelId, PruneOptions};
use crate::domain::DomainError;

/// Filter for repository queries over the models of one bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelQuery {
    pub language_code: String,
}

impl ModelQuery {
    pub fn language(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
        }
    }

    pub fn matches(&self, model: &Model) -> bool {
        model.language_code() == self.language_code
    }
}

/// Persistence of trained model artifacts for a single bot
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Acquire underlying resources (directories, connections)
    async fn initialize(&self) -> Result<(), DomainError>;

    /// Release underlying resources
    async fn teardown(&self) -> Result<(), DomainError>;

    /// Get a model by exact ID
    async fn get_model(&self, id: &ModelId) -> Result<Option<Model>, DomainError>;

    /// Get the most recently created model matching the query
    async fn get_latest_model(&self, query: &ModelQuery) -> Result<Option<Model>, DomainError>;

    /// Persist a model; saving the same ID twice is a no-op overwrite
    async fn save_model(&self, model: &Model) -> Result<(), DomainError>;

    /// List models matching the query, in no particular order
    async fn list_models(&self, query: &ModelQuery) -> Result<Vec<Model>, DomainError>;

    /// Delete all but the `to_keep` most recent candidates, never the protected one.
    /// Returns the deleted IDs.
    async fn prune_models(
        &self,
        models: Vec<Model>,
        options: &PruneOptions,
    ) -> Result<Vec<ModelId>, DomainError>;
}
