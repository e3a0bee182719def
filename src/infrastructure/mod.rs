//! Infrastructure layer - Implementations of domain contracts and services

pub mod definitions;
pub mod logging;
pub mod model;
pub mod nlu;
pub mod services;

pub use definitions::InMemoryDefinitionsProvider;
pub use model::{FileSystemModelRepository, InMemoryModelRepository};
pub use nlu::{ActiveTrainings, ModelRegistry, PredictionRouter};
pub use services::{ModelOrchestrator, OrchestratorConfig};
