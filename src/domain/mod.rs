//! Domain layer - Core entities and collaborator contracts

pub mod bot;
pub mod engine;
pub mod error;
pub mod model;
pub mod training;

pub use bot::{BotDefinition, NluError};
pub use engine::{Engine, EngineError, EntityPrediction, IntentPrediction, PredictionResult};
pub use error::DomainError;
pub use model::{
    select_models_to_prune, Model, ModelId, ModelQuery, ModelRepository, ModelValidationError,
    PruneOptions, DEFAULT_MODELS_TO_KEEP,
};
pub use training::{
    ignore_progress, progress_channel, DefinitionsProvider, EntityDefinition, IntentDefinition,
    ProgressCallback, TrainingId, TrainingOptions, TrainingSet,
};
