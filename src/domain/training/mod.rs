//! Training domain - training sets, options and the definitions source

mod definitions;
mod entity;

pub use definitions::DefinitionsProvider;
pub use entity::{
    ignore_progress, progress_channel, EntityDefinition, IntentDefinition, ListValue,
    ProgressCallback, SlotDefinition, TrainingId, TrainingOptions, TrainingSet,
};

#[cfg(test)]
pub use definitions::MockDefinitionsProvider;
