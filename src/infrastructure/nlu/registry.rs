//! Model Registry
//!
//! In-memory mapping from language to the model currently loaded for it.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{BotDefinition, Model, NluError};

/// Broken registry invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryViolation {
    #[error("Language '{language}' is not configured for the bot")]
    UnconfiguredLanguage { language: String },

    #[error("Entry '{key}' holds a model for language '{model_language}'")]
    LanguageMismatch { key: String, model_language: String },
}

/// Loaded models of one bot, at most one per language.
///
/// Entries are replaced by a single assignment of an `Arc<Model>`, so readers see either the old
/// or the new model, never a partial entry. Lookups clone the `Arc` and release the lock, so
/// inference never runs under the lock.
#[derive(Debug)]
pub struct ModelRegistry {
    bot_id: String,
    languages: Vec<String>,
    models: RwLock<HashMap<String, Arc<Model>>>,
}

impl ModelRegistry {
    pub fn new(bot: &BotDefinition) -> Self {
        Self {
            bot_id: bot.bot_id().to_string(),
            languages: bot.languages().to_vec(),
            models: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, language_code: &str) -> Option<Arc<Model>> {
        let models = self.models.read().await;
        models.get(language_code).cloned()
    }

    /// Install a model under its language, returning the one it replaces
    pub async fn install(&self, model: Arc<Model>) -> Result<Option<Arc<Model>>, NluError> {
        let language = model.language_code().to_string();

        if !self.languages.contains(&language) {
            return Err(NluError::unsupported_language(&self.bot_id, language));
        }

        let mut models = self.models.write().await;
        debug!(language = %language, model_id = %model.id(), "Installing model");
        Ok(models.insert(language, model))
    }

    pub async fn remove(&self, language_code: &str) -> Option<Arc<Model>> {
        let mut models = self.models.write().await;
        models.remove(language_code)
    }

    /// Loaded models, sorted by language
    pub async fn snapshot(&self) -> Vec<Arc<Model>> {
        let models = self.models.read().await;
        let mut loaded: Vec<Arc<Model>> = models.values().cloned().collect();
        loaded.sort_by(|a, b| a.language_code().cmp(b.language_code()));
        loaded
    }

    pub async fn len(&self) -> usize {
        self.models.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.models.read().await.is_empty()
    }

    /// Verify every key is a configured language and matches its model's language
    pub async fn check_invariants(&self) -> Result<(), RegistryViolation> {
        let models = self.models.read().await;

        for (key, model) in models.iter() {
            if !self.languages.contains(key) {
                return Err(RegistryViolation::UnconfiguredLanguage {
                    language: key.clone(),
                });
            }
            if model.language_code() != key {
                return Err(RegistryViolation::LanguageMismatch {
                    key: key.clone(),
                    model_language: model.language_code().to_string(),
                });
            }
        }

        Ok(())
    }
}
