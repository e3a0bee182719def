//! Definitions provider trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::TrainingSet;
use crate::domain::DomainError;

/// Source of the training examples of a bot
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DefinitionsProvider: Send + Sync {
    async fn initialize(&self) -> Result<(), DomainError>;

    async fn teardown(&self) -> Result<(), DomainError>;

    /// Build the training set of one language
    async fn get_train_set(&self, language_code: &str) -> Result<TrainingSet, DomainError>;
}
