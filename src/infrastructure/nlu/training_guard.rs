//! Per-language training exclusion

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::domain::TrainingId;

/// Set of trainings currently in flight.
///
/// Training ids are derived from bot and language only, so two concurrent trainings of one
/// language would be indistinguishable to the engine. The second one is refused.
#[derive(Debug, Default)]
pub struct ActiveTrainings {
    active: Mutex<HashSet<TrainingId>>,
}

impl ActiveTrainings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a training as started; `None` when the same training is already running
    pub fn try_start(&self, training_id: &TrainingId) -> Option<TrainingGuard<'_>> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        if !active.insert(training_id.clone()) {
            return None;
        }

        Some(TrainingGuard {
            trainings: self,
            training_id: training_id.clone(),
        })
    }

    pub fn is_running(&self, training_id: &TrainingId) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(training_id)
    }
}

/// Marks a training as finished when dropped, whatever the outcome
#[derive(Debug)]
pub struct TrainingGuard<'a> {
    trainings: &'a ActiveTrainings,
    training_id: TrainingId,
}

impl Drop for TrainingGuard<'_> {
    fn drop(&mut self) {
        self.trainings
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.training_id);
    }
}
