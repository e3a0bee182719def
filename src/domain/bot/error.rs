//! Errors surfaced by the model orchestrator

use thiserror::Error;

use crate::domain::engine::EngineError;
use crate::domain::DomainError;

/// Errors that can occur while managing a bot's NLU models
#[derive(Debug, Error)]
pub enum NluError {
    #[error("Bot '{bot_id}' doesn't speak language '{language}'")]
    UnsupportedLanguage { bot_id: String, language: String },

    #[error("Model not found: {message}")]
    ModelNotFound { message: String },

    #[error("No model loaded for language '{language}' nor default language '{default_language}'")]
    NoModelAvailable {
        language: String,
        default_language: String,
    },

    #[error("Training '{training_id}' failed: {source}")]
    TrainingFailed {
        training_id: String,
        #[source]
        source: EngineError,
    },

    #[error("Training '{training_id}' is already in progress")]
    TrainingInProgress { training_id: String },

    #[error("Failed to initialize {dependency}: {source}")]
    DependencyInit {
        dependency: &'static str,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl NluError {
    pub fn unsupported_language(bot_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            bot_id: bot_id.into(),
            language: language.into(),
        }
    }

    pub fn model_not_found(message: impl Into<String>) -> Self {
        Self::ModelNotFound {
            message: message.into(),
        }
    }

    /// Whether the error stems from the request rather than a failing dependency
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLanguage { .. }
                | Self::ModelNotFound { .. }
                | Self::NoModelAvailable { .. }
                | Self::TrainingInProgress { .. }
        )
    }

    /// Whether a training failed because it was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::TrainingFailed {
                source: EngineError::Cancelled { .. },
                ..
            }
        )
    }
}
