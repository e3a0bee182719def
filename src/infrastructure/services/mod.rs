//! Application services

mod model_orchestrator;

pub use model_orchestrator::{ModelOrchestrator, OrchestratorConfig};
