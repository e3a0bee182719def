//! Training entities - job identifiers, training sets and options

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::model::Model;

/// Identifier of a training job.
///
/// Derived from bot and language only, so a running job can be addressed for cancellation without
/// a handle. This also means at most one training per language can be in flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainingId {
    bot_id: String,
    language_code: String,
}

impl TrainingId {
    pub fn new(bot_id: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            language_code: language_code.into(),
        }
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }
}

impl fmt::Display for TrainingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bot_id, self.language_code)
    }
}

/// A slot an intent utterance can fill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub name: String,
    pub entities: Vec<String>,
}

/// Labeled utterances for one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub name: String,

    #[serde(default)]
    pub contexts: Vec<String>,

    #[serde(default)]
    pub slots: Vec<SlotDefinition>,

    pub utterances: Vec<String>,
}

impl IntentDefinition {
    pub fn new(name: impl Into<String>, utterances: Vec<String>) -> Self {
        Self {
            name: name.into(),
            contexts: vec!["global".to_string()],
            slots: Vec::new(),
            utterances,
        }
    }

    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.contexts = contexts;
        self
    }

    pub fn with_slot(mut self, slot: SlotDefinition) -> Self {
        self.slots.push(slot);
        self
    }
}

/// A custom entity definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityDefinition {
    /// Closed list of values with synonyms
    List {
        name: String,
        fuzzy: bool,
        values: Vec<ListValue>,
    },
    /// Regular-expression based entity
    Pattern {
        name: String,
        pattern: String,
        case_sensitive: bool,
    },
}

impl EntityDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::List { name, .. } | Self::Pattern { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListValue {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// Every labeled example of one language, as handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub language_code: String,

    /// Seed for the engine's randomized steps
    #[serde(default)]
    pub seed: u32,

    #[serde(default)]
    pub intents: Vec<IntentDefinition>,

    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

impl TrainingSet {
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            seed: 0,
            intents: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_intent(mut self, intent: IntentDefinition) -> Self {
        self.intents.push(intent);
        self
    }

    pub fn with_entity(mut self, entity: EntityDefinition) -> Self {
        self.entities.push(entity);
        self
    }

    /// Total number of labeled utterances
    pub fn example_count(&self) -> usize {
        self.intents.iter().map(|i| i.utterances.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.example_count() == 0
    }

    /// Stable byte representation of the set, suitable for content hashing
    pub fn fingerprint(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Progress reporting hook, called by the engine with values in `[0, 1]`
pub type ProgressCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Callback that discards progress
pub fn ignore_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Callback forwarding progress to a channel the caller consumes
pub fn progress_channel() -> (ProgressCallback, mpsc::UnboundedReceiver<f32>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let callback: ProgressCallback = Arc::new(move |progress| {
        // Receiver gone means nobody listens anymore
        let _ = tx.send(progress);
    });
    (callback, rx)
}

/// Options passed to the engine for one training run
#[derive(Clone)]
pub struct TrainingOptions {
    /// Model currently loaded for the language, used as warm-start seed
    pub previous_model: Option<Arc<Model>>,

    pub progress: ProgressCallback,
}

impl TrainingOptions {
    pub fn new(progress: ProgressCallback) -> Self {
        Self {
            previous_model: None,
            progress,
        }
    }

    pub fn with_previous_model(mut self, model: Option<Arc<Model>>) -> Self {
        self.previous_model = model;
        self
    }

    /// Report progress, clamped to `[0, 1]`
    pub fn report_progress(&self, progress: f32) {
        (self.progress)(progress.clamp(0.0, 1.0));
    }
}

impl fmt::Debug for TrainingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingOptions")
            .field(
                "previous_model",
                &self.previous_model.as_ref().map(|m| m.id().to_string()),
            )
            .finish_non_exhaustive()
    }
}
