use thiserror::Error;

/// Errors reported by an NLU engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Training '{training_id}' was cancelled")]
    Cancelled { training_id: String },

    #[error("Training error: {message}")]
    Training { message: String },

    #[error("Model '{model_id}' is not loaded")]
    ModelNotLoaded { model_id: String },

    #[error("Inference error: {message}")]
    Inference { message: String },

    #[error("Engine error: {message}")]
    Internal { message: String },
}

impl EngineError {
    pub fn cancelled(training_id: impl Into<String>) -> Self {
        Self::Cancelled {
            training_id: training_id.into(),
        }
    }

    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
        }
    }

    pub fn model_not_loaded(model_id: impl Into<String>) -> Self {
        Self::ModelNotLoaded {
            model_id: model_id.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
