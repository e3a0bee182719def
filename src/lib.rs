//! bot-nlu
//!
//! Lifecycle of a bot's per-language NLU models:
//! - Training through an opaque engine, seeded from the currently loaded model
//! - Persistence and retention of trained models
//! - Loading models into a per-language registry
//! - Routing predictions, with fallback to the bot's default language

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    BotDefinition, DefinitionsProvider, DomainError, Engine, EngineError, Model, ModelId,
    ModelRepository, NluError, PredictionResult, TrainingSet,
};
pub use infrastructure::{ModelOrchestrator, OrchestratorConfig};
