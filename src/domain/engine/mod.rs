//! Engine domain - the training and inference contract

mod backend;
mod error;
mod prediction;

pub use backend::Engine;
pub use error::EngineError;
pub use prediction::{EntityPrediction, IntentPrediction, PredictionResult};

#[cfg(test)]
pub use backend::mock;
