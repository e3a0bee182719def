//! Prediction Router
//!
//! Resolves the model serving a request language and delegates inference to the engine.

use std::sync::Arc;

use tracing::debug;

use super::registry::ModelRegistry;
use crate::domain::{Engine, Model, NluError, PredictionResult};

/// Routes predictions to the loaded model of the requested language, falling back once to the
/// default language
pub struct PredictionRouter {
    default_language: String,
    registry: Arc<ModelRegistry>,
    engine: Arc<dyn Engine>,
}

impl PredictionRouter {
    pub fn new(
        default_language: impl Into<String>,
        registry: Arc<ModelRegistry>,
        engine: Arc<dyn Engine>,
    ) -> Self {
        Self {
            default_language: default_language.into(),
            registry,
            engine,
        }
    }

    /// Model for the language, else the default-language model
    pub async fn resolve(&self, language_code: &str) -> Result<Arc<Model>, NluError> {
        if let Some(model) = self.registry.get(language_code).await {
            return Ok(model);
        }

        if let Some(model) = self.registry.get(&self.default_language).await {
            debug!(
                requested = %language_code,
                fallback = %self.default_language,
                "No model loaded for language, using default language"
            );
            return Ok(model);
        }

        Err(NluError::NoModelAvailable {
            language: language_code.to_string(),
            default_language: self.default_language.clone(),
        })
    }

    pub async fn predict(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<PredictionResult, NluError> {
        let model = self.resolve(language_code).await?;
        Ok(self.engine.predict(&model, text).await?)
    }
}
