//! In-memory definitions provider

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::error::DomainError;
use crate::domain::training::{DefinitionsProvider, TrainingSet};

/// Definitions provider serving training sets held in memory.
///
/// Languages without definitions yield an empty set for that language.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefinitionsProvider {
    sets: Arc<RwLock<HashMap<String, TrainingSet>>>,
}

impl InMemoryDefinitionsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sets(sets: impl IntoIterator<Item = TrainingSet>) -> Self {
        let map = sets
            .into_iter()
            .map(|s| (s.language_code.clone(), s))
            .collect();

        Self {
            sets: Arc::new(RwLock::new(map)),
        }
    }

    /// Replace the training set of a language
    pub async fn put(&self, set: TrainingSet) {
        let mut sets = self.sets.write().await;
        sets.insert(set.language_code.clone(), set);
    }
}

#[async_trait]
impl DefinitionsProvider for InMemoryDefinitionsProvider {
    async fn initialize(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn teardown(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_train_set(&self, language_code: &str) -> Result<TrainingSet, DomainError> {
        let sets = self.sets.read().await;
        Ok(sets
            .get(language_code)
            .cloned()
            .unwrap_or_else(|| TrainingSet::new(language_code)))
    }
}
