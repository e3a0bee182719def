//! Retention policy for persisted models

use std::cmp::Reverse;

use super::{Model, ModelId};

/// Number of models per language kept after a training run
pub const DEFAULT_MODELS_TO_KEEP: usize = 2;

/// Options for a pruning pass over the models of one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOptions {
    /// How many of the most recent models survive
    pub to_keep: usize,

    /// Model that must survive regardless of its rank (the one currently loaded)
    pub protected: Option<ModelId>,
}

impl PruneOptions {
    pub fn keep(to_keep: usize) -> Self {
        Self {
            to_keep,
            protected: None,
        }
    }

    pub fn with_protected(mut self, id: ModelId) -> Self {
        self.protected = Some(id);
        self
    }
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self::keep(DEFAULT_MODELS_TO_KEEP)
    }
}

/// Select the ids to delete from a candidate set.
///
/// Candidates are ranked by creation time, newest first (ties broken by id so the result is
/// stable). Everything past `to_keep` is selected except the protected model.
pub fn select_models_to_prune(models: &[Model], options: &PruneOptions) -> Vec<ModelId> {
    if models.len() <= options.to_keep {
        return Vec::new();
    }

    let mut ranked: Vec<&Model> = models.iter().collect();
    ranked.sort_by_key(|m| (Reverse(m.created_at()), Reverse(m.id().to_string())));

    ranked
        .into_iter()
        .skip(options.to_keep)
        .map(|m| m.id().clone())
        .filter(|id| options.protected.as_ref() != Some(id))
        .collect()
}
