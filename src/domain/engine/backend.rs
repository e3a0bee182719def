use async_trait::async_trait;

use super::{EngineError, PredictionResult};
use crate::domain::model::{Model, ModelId};
use crate::domain::training::{TrainingId, TrainingOptions, TrainingSet};

/// NLU engine performing training and inference on opaque model artifacts.
///
/// Cancellation is cooperative: `cancel_training` only signals the job, which is expected to stop
/// at its next checkpoint and make `train` return [`EngineError::Cancelled`].
#[async_trait]
pub trait Engine: Send + Sync {
    /// Train a model for the language of `training_set`
    async fn train(
        &self,
        training_id: &TrainingId,
        training_set: TrainingSet,
        options: TrainingOptions,
    ) -> Result<Model, EngineError>;

    /// Request cancellation of a running training; unknown IDs are ignored
    async fn cancel_training(&self, training_id: &TrainingId) -> Result<(), EngineError>;

    /// Materialize a model so it can serve predictions
    async fn load_model(&self, model: &Model) -> Result<(), EngineError>;

    /// Release the runtime resources of a loaded model
    async fn unload_model(&self, model_id: &ModelId) -> Result<(), EngineError>;

    async fn predict(&self, model: &Model, text: &str) -> Result<PredictionResult, EngineError>;
}
