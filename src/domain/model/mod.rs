//! Model domain - trained artifacts, identifiers and retention

mod entity;
mod pruning;
mod repository;
mod validation;

pub use entity::{Model, ModelId};
pub use pruning::{select_models_to_prune, PruneOptions, DEFAULT_MODELS_TO_KEEP};
pub use repository::{ModelQuery, ModelRepository};
pub use validation::{
    validate_bot_id, validate_hash, validate_language_code, ModelValidationError,
};

#[cfg(test)]
pub use repository::MockModelRepository;
