//! NLU infrastructure
//!
//! In-memory model registry, prediction routing and training exclusion used by the
//! model orchestrator.

pub mod registry;
pub mod router;
pub mod training_guard;

pub use registry::{ModelRegistry, RegistryViolation};
pub use router::PredictionRouter;
pub use training_guard::{ActiveTrainings, TrainingGuard};
