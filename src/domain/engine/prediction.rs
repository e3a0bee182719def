//! Prediction output types

use serde::{Deserialize, Serialize};

use crate::domain::model::ModelId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    pub name: String,
    pub confidence: f32,
}

/// Entity occurrence found in the input text (`start`/`end` are char offsets)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPrediction {
    pub name: String,
    pub value: String,
    pub confidence: f32,
    pub start: usize,
    pub end: usize,
}

/// Engine output for one text input, returned to callers unmodified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Model that produced the prediction
    pub model_id: ModelId,

    #[serde(default)]
    pub intents: Vec<IntentPrediction>,

    #[serde(default)]
    pub entities: Vec<EntityPrediction>,
}

impl PredictionResult {
    pub fn new(model_id: ModelId) -> Self {
        Self {
            model_id,
            intents: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_intent(mut self, name: impl Into<String>, confidence: f32) -> Self {
        self.intents.push(IntentPrediction {
            name: name.into(),
            confidence,
        });
        self
    }

    /// Language of the model that answered
    pub fn language_code(&self) -> &str {
        self.model_id.language_code()
    }

    /// Intent with the highest confidence
    pub fn top_intent(&self) -> Option<&IntentPrediction> {
        self.intents
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}
