//! Model orchestrator - lifecycle of one bot's per-language NLU models

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::domain::{
    BotDefinition, DefinitionsProvider, DomainError, Engine, EngineError, Model, ModelId,
    ModelQuery, ModelRepository, NluError, PredictionResult, ProgressCallback, PruneOptions,
    TrainingId, TrainingOptions, DEFAULT_MODELS_TO_KEEP,
};
use crate::infrastructure::nlu::{ActiveTrainings, ModelRegistry, PredictionRouter};

/// Model orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Models per language kept in the repository after each training
    pub models_to_keep: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            models_to_keep: DEFAULT_MODELS_TO_KEEP,
        }
    }
}

/// Trains, loads and serves the NLU models of a single bot.
///
/// Owns the registry of loaded models. `mount` must succeed before any other operation.
pub struct ModelOrchestrator {
    bot: BotDefinition,
    config: OrchestratorConfig,
    engine: Arc<dyn Engine>,
    repository: Arc<dyn ModelRepository>,
    definitions: Arc<dyn DefinitionsProvider>,
    registry: Arc<ModelRegistry>,
    router: PredictionRouter,
    trainings: ActiveTrainings,
}

impl ModelOrchestrator {
    pub fn new(
        bot: BotDefinition,
        engine: Arc<dyn Engine>,
        repository: Arc<dyn ModelRepository>,
        definitions: Arc<dyn DefinitionsProvider>,
    ) -> Self {
        Self::with_config(
            bot,
            engine,
            repository,
            definitions,
            OrchestratorConfig::default(),
        )
    }

    pub fn with_config(
        bot: BotDefinition,
        engine: Arc<dyn Engine>,
        repository: Arc<dyn ModelRepository>,
        definitions: Arc<dyn DefinitionsProvider>,
        config: OrchestratorConfig,
    ) -> Self {
        let registry = Arc::new(ModelRegistry::new(&bot));
        let router = PredictionRouter::new(bot.default_language(), registry.clone(), engine.clone());

        Self {
            bot,
            config,
            engine,
            repository,
            definitions,
            registry,
            router,
            trainings: ActiveTrainings::new(),
        }
    }

    pub fn bot(&self) -> &BotDefinition {
        &self.bot
    }

    /// Initialize the model repository, then the definitions provider
    #[instrument(skip(self), fields(bot_id = %self.bot.bot_id()))]
    pub async fn mount(&self) -> Result<(), NluError> {
        self.repository
            .initialize()
            .await
            .map_err(|source| NluError::DependencyInit {
                dependency: "model repository",
                source,
            })?;

        self.definitions
            .initialize()
            .await
            .map_err(|source| NluError::DependencyInit {
                dependency: "definitions provider",
                source,
            })?;

        info!("Mounted NLU models");
        Ok(())
    }

    /// Tear down the definitions provider and unload every loaded model.
    ///
    /// The registry is cleared even when the teardown fails; the teardown error is returned
    /// afterwards.
    #[instrument(skip(self), fields(bot_id = %self.bot.bot_id()))]
    pub async fn unmount(&self) -> Result<(), NluError> {
        let teardown = self.definitions.teardown().await;

        let mut unloaded = Vec::new();
        for language in self.bot.languages() {
            if let Some(model) = self.registry.remove(language).await {
                unloaded.push(model);
            }
        }

        let results = join_all(unloaded.iter().map(|m| self.engine.unload_model(m.id()))).await;
        for (model, result) in unloaded.iter().zip(results) {
            if let Err(e) = result {
                warn!(model_id = %model.id(), error = %e, "Failed to unload model");
            }
        }

        teardown?;
        info!("Unmounted NLU models");
        Ok(())
    }

    /// Load the most recent persisted model of a language
    #[instrument(skip(self), fields(bot_id = %self.bot.bot_id()))]
    pub async fn load_latest(&self, language_code: &str) -> Result<Arc<Model>, NluError> {
        self.ensure_speaks(language_code)?;

        let model = self
            .repository
            .get_latest_model(&ModelQuery::language(language_code))
            .await?
            .ok_or_else(|| {
                NluError::model_not_found(format!(
                    "No model found for language '{}'",
                    language_code
                ))
            })?;

        self.install(model).await
    }

    /// Load a persisted model by exact ID
    #[instrument(skip(self, model_id), fields(bot_id = %self.bot.bot_id(), model_id = %model_id))]
    pub async fn load(&self, model_id: &ModelId) -> Result<Arc<Model>, NluError> {
        let model = self
            .repository
            .get_model(model_id)
            .await?
            .ok_or_else(|| NluError::model_not_found(format!("Model '{}' not found", model_id)))?;

        self.install(model).await
    }

    /// Train a model for a language, seeded from the currently loaded one.
    ///
    /// On success the model is persisted, loaded, installed and older models of the language are
    /// pruned. On failure nothing is persisted and the registry is left untouched.
    #[instrument(skip(self, progress), fields(bot_id = %self.bot.bot_id()))]
    pub async fn train(
        &self,
        language_code: &str,
        progress: ProgressCallback,
    ) -> Result<Arc<Model>, NluError> {
        self.ensure_speaks(language_code)?;

        let training_id = self.training_id(language_code);
        let _guard = self.trainings.try_start(&training_id).ok_or_else(|| {
            NluError::TrainingInProgress {
                training_id: training_id.to_string(),
            }
        })?;

        let training_set = self.definitions.get_train_set(language_code).await?;
        let previous_model = self.registry.get(language_code).await;

        info!(
            training_id = %training_id,
            examples = training_set.example_count(),
            warm_start = previous_model.is_some(),
            "Starting training"
        );

        let options = TrainingOptions::new(progress).with_previous_model(previous_model);
        let model = self
            .engine
            .train(&training_id, training_set, options)
            .await
            .map_err(|source| {
                warn!(training_id = %training_id, error = %source, "Training failed");
                NluError::TrainingFailed {
                    training_id: training_id.to_string(),
                    source,
                }
            })?;

        if model.language_code() != language_code {
            return Err(NluError::TrainingFailed {
                training_id: training_id.to_string(),
                source: EngineError::training(format!(
                    "Engine returned a model for language '{}'",
                    model.language_code()
                )),
            });
        }

        self.repository.save_model(&model).await?;
        let model = self.install(model).await?;

        info!(training_id = %training_id, model_id = %model.id(), "Training completed");

        if let Err(e) = self.prune(language_code).await {
            warn!(language = %language_code, error = %e, "Failed to prune models");
        }

        Ok(model)
    }

    /// Ask the engine to stop the running training of a language. Returns without waiting.
    #[instrument(skip(self), fields(bot_id = %self.bot.bot_id()))]
    pub async fn cancel_training(&self, language_code: &str) -> Result<(), NluError> {
        self.ensure_speaks(language_code)?;

        let training_id = self.training_id(language_code);
        self.engine.cancel_training(&training_id).await?;

        info!(training_id = %training_id, "Requested training cancellation");
        Ok(())
    }

    /// Predict with the model of `anticipated_language`, or of the default language
    #[instrument(skip(self, text), fields(bot_id = %self.bot.bot_id()))]
    pub async fn predict(
        &self,
        text: &str,
        anticipated_language: Option<&str>,
    ) -> Result<PredictionResult, NluError> {
        let language = anticipated_language.unwrap_or(self.bot.default_language());
        self.router.predict(text, language).await
    }

    /// Model currently serving a language, if any
    pub async fn loaded_model(&self, language_code: &str) -> Option<Arc<Model>> {
        self.registry.get(language_code).await
    }

    /// All loaded models, sorted by language
    pub async fn loaded_models(&self) -> Vec<Arc<Model>> {
        self.registry.snapshot().await
    }

    pub fn is_training(&self, language_code: &str) -> bool {
        self.trainings.is_running(&self.training_id(language_code))
    }

    fn training_id(&self, language_code: &str) -> TrainingId {
        TrainingId::new(self.bot.bot_id(), language_code)
    }

    fn ensure_speaks(&self, language_code: &str) -> Result<(), NluError> {
        if !self.bot.speaks(language_code) {
            return Err(NluError::unsupported_language(
                self.bot.bot_id(),
                language_code,
            ));
        }
        Ok(())
    }

    /// Load a model into the engine, then make it the registry entry of its language
    async fn install(&self, model: Model) -> Result<Arc<Model>, NluError> {
        self.ensure_speaks(model.language_code())?;

        let model = Arc::new(model);
        self.engine.load_model(&model).await?;
        self.registry.install(model.clone()).await?;

        info!(model_id = %model.id(), language = %model.language_code(), "Model loaded");
        Ok(model)
    }

    /// Keep the most recent models of a language, never deleting the loaded one
    async fn prune(&self, language_code: &str) -> Result<(), DomainError> {
        let models = self
            .repository
            .list_models(&ModelQuery::language(language_code))
            .await?;

        let mut options = PruneOptions::keep(self.config.models_to_keep);
        if let Some(live) = self.registry.get(language_code).await {
            options = options.with_protected(live.id().clone());
        }

        let deleted = self.repository.prune_models(models, &options).await?;
        if !deleted.is_empty() {
            info!(language = %language_code, count = deleted.len(), "Pruned old models");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mockall::Sequence;
    use tokio_test::{assert_err, assert_ok};

    use crate::domain::engine::mock::MockEngine;
    use crate::domain::model::MockModelRepository;
    use crate::domain::training::MockDefinitionsProvider;
    use crate::domain::{ignore_progress, progress_channel, IntentDefinition, TrainingSet};
    use crate::infrastructure::definitions::InMemoryDefinitionsProvider;
    use crate::infrastructure::model::InMemoryModelRepository;

    fn bot() -> BotDefinition {
        BotDefinition::new("welcome-bot", "en", ["en", "fr"]).unwrap()
    }

    fn french_set() -> TrainingSet {
        TrainingSet::new("fr")
            .with_intent(IntentDefinition::new(
                "greeting",
                vec!["bonjour".to_string(), "salut".to_string()],
            ))
            .with_intent(IntentDefinition::new("goodbye", vec!["au revoir".to_string()]))
    }

    fn stored_model(content: &str, lang: &str, age_hours: i64) -> Model {
        Model::new(
            ModelId::new("welcome-bot", "aa", content, lang).unwrap(),
            Vec::new(),
        )
        .with_created_at(Utc::now() - Duration::hours(age_hours))
    }

    struct Fixture {
        engine: Arc<MockEngine>,
        repository: Arc<InMemoryModelRepository>,
        orchestrator: Arc<ModelOrchestrator>,
    }

    fn fixture_with(engine: MockEngine, stored: Vec<Model>) -> Fixture {
        let engine = Arc::new(engine);
        let repository = Arc::new(InMemoryModelRepository::with_models(stored));
        let definitions = Arc::new(InMemoryDefinitionsProvider::with_sets(vec![
            french_set(),
            TrainingSet::new("en").with_intent(IntentDefinition::new(
                "greeting",
                vec!["hello".to_string()],
            )),
        ]));

        let orchestrator = Arc::new(ModelOrchestrator::new(
            bot(),
            engine.clone(),
            repository.clone(),
            definitions,
        ));

        Fixture {
            engine,
            repository,
            orchestrator,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockEngine::new(), Vec::new())
    }

    #[tokio::test]
    async fn test_mount_initializes_dependencies_in_order() {
        let mut seq = Sequence::new();
        let mut repository = MockModelRepository::new();
        let mut definitions = MockDefinitionsProvider::new();

        repository
            .expect_initialize()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        definitions
            .expect_initialize()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let orchestrator = ModelOrchestrator::new(
            bot(),
            Arc::new(MockEngine::new()),
            Arc::new(repository),
            Arc::new(definitions),
        );

        assert_ok!(orchestrator.mount().await);
    }

    #[tokio::test]
    async fn test_mount_fails_when_repository_fails() {
        let mut repository = MockModelRepository::new();
        let mut definitions = MockDefinitionsProvider::new();

        repository
            .expect_initialize()
            .returning(|| Err(DomainError::storage("read-only file system")));
        definitions.expect_initialize().times(0);

        let orchestrator = ModelOrchestrator::new(
            bot(),
            Arc::new(MockEngine::new()),
            Arc::new(repository),
            Arc::new(definitions),
        );

        let error = assert_err!(orchestrator.mount().await);
        assert!(matches!(
            error,
            NluError::DependencyInit {
                dependency: "model repository",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_mount_fails_when_definitions_fail() {
        let mut repository = MockModelRepository::new();
        let mut definitions = MockDefinitionsProvider::new();

        repository.expect_initialize().returning(|| Ok(()));
        definitions
            .expect_initialize()
            .returning(|| Err(DomainError::configuration("no intents directory")));

        let orchestrator = ModelOrchestrator::new(
            bot(),
            Arc::new(MockEngine::new()),
            Arc::new(repository),
            Arc::new(definitions),
        );

        let error = assert_err!(orchestrator.mount().await);
        assert!(matches!(
            error,
            NluError::DependencyInit {
                dependency: "definitions provider",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unsupported_language_is_rejected() {
        let f = fixture();

        let train = f.orchestrator.train("de", ignore_progress()).await;
        assert!(matches!(train, Err(NluError::UnsupportedLanguage { .. })));

        let cancel = f.orchestrator.cancel_training("de").await;
        assert!(matches!(cancel, Err(NluError::UnsupportedLanguage { .. })));

        assert!(f.engine.training_calls().is_empty());
        assert!(f.engine.cancel_calls().is_empty());
    }

    #[tokio::test]
    async fn test_predict_unsupported_language_falls_back_to_default() {
        let f = fixture_with(MockEngine::new(), vec![stored_model("01", "en", 1)]);
        let en = f.orchestrator.load_latest("en").await.unwrap();

        let result = f.orchestrator.predict("hallo", Some("de")).await.unwrap();

        assert_eq!(&result.model_id, en.id());
    }

    #[tokio::test]
    async fn test_train_installs_persists_and_serves_new_model() {
        let f = fixture();
        let (progress, mut updates) = progress_channel();

        let model = f.orchestrator.train("fr", progress).await.unwrap();

        let calls = f.engine.training_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].training_id.to_string(), "welcome-bot:fr");
        assert_eq!(calls[0].training_set.example_count(), 3);
        assert!(calls[0].previous_model.is_none());

        assert_eq!(f.orchestrator.loaded_model("fr").await, Some(model.clone()));
        assert_eq!(
            f.repository.get_model(model.id()).await.unwrap().as_ref(),
            Some(model.as_ref())
        );
        assert_eq!(updates.recv().await, Some(0.0));
        assert_eq!(updates.recv().await, Some(1.0));

        let prediction = f.orchestrator.predict("bonjour", Some("fr")).await.unwrap();
        assert_eq!(&prediction.model_id, model.id());
        assert_eq!(
            f.engine.predictions(),
            vec![(model.id().clone(), "bonjour".to_string())]
        );

        let result = f.orchestrator.predict("hello", None).await;
        assert!(matches!(result, Err(NluError::NoModelAvailable { .. })));
    }

    #[tokio::test]
    async fn test_train_saves_once_then_lists_and_prunes() {
        let mut seq = Sequence::new();
        let mut repository = MockModelRepository::new();

        repository
            .expect_save_model()
            .withf(|model| model.language_code() == "fr")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repository
            .expect_list_models()
            .withf(|query| query.language_code == "fr")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Vec::new()));
        repository
            .expect_prune_models()
            .withf(|_, options| options.to_keep == 2 && options.protected.is_some())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Vec::new()));

        let orchestrator = ModelOrchestrator::new(
            bot(),
            Arc::new(MockEngine::new()),
            Arc::new(repository),
            Arc::new(InMemoryDefinitionsProvider::with_sets(vec![french_set()])),
        );

        assert_ok!(orchestrator.train("fr", ignore_progress()).await);
    }

    #[tokio::test]
    async fn test_retraining_uses_previous_model_as_seed() {
        let f = fixture();

        let first = f.orchestrator.train("fr", ignore_progress()).await.unwrap();
        let second = f.orchestrator.train("fr", ignore_progress()).await.unwrap();

        let calls = f.engine.training_calls();
        assert_eq!(calls[1].previous_model.as_ref(), Some(first.id()));
        assert_eq!(f.orchestrator.loaded_model("fr").await, Some(second));
    }

    #[tokio::test]
    async fn test_training_keeps_two_most_recent_models() {
        let f = fixture_with(
            MockEngine::new(),
            vec![
                stored_model("01", "fr", 5),
                stored_model("02", "fr", 4),
                stored_model("03", "fr", 3),
                stored_model("04", "en", 9),
            ],
        );

        let mut trained = Vec::new();
        for _ in 0..3 {
            trained.push(f.orchestrator.train("fr", ignore_progress()).await.unwrap());
        }

        let remaining = f
            .repository
            .list_models(&ModelQuery::language("fr"))
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);

        let live = f.orchestrator.loaded_model("fr").await.unwrap();
        assert!(remaining.iter().any(|m| m.id() == live.id()));
        assert!(remaining.iter().any(|m| m.id() == trained[1].id()));

        // Other languages are not touched
        let en = f
            .repository
            .list_models(&ModelQuery::language("en"))
            .await
            .unwrap();
        assert_eq!(en.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_training_leaves_state_unchanged() {
        let f = fixture_with(
            MockEngine::new().with_training_error("not enough utterances"),
            vec![stored_model("01", "fr", 1)],
        );
        let previous = f.orchestrator.load_latest("fr").await.unwrap();

        let error = assert_err!(f.orchestrator.train("fr", ignore_progress()).await);

        assert!(matches!(error, NluError::TrainingFailed { .. }));
        assert!(!error.is_cancelled());
        assert_eq!(f.orchestrator.loaded_model("fr").await, Some(previous));
        assert_eq!(f.repository.len().await, 1);
        assert!(!f.orchestrator.is_training("fr"));
    }

    #[tokio::test]
    async fn test_cancel_stops_running_training() {
        let f = fixture_with(MockEngine::new().with_blocking_training(), Vec::new());

        let orchestrator = f.orchestrator.clone();
        let training =
            tokio::spawn(async move { orchestrator.train("fr", ignore_progress()).await });
        f.engine.wait_training_started().await;
        assert!(f.orchestrator.is_training("fr"));

        assert_ok!(f.orchestrator.cancel_training("fr").await);

        let error = assert_err!(training.await.unwrap());
        assert!(error.is_cancelled());
        assert!(f.orchestrator.loaded_model("fr").await.is_none());
        assert!(f.repository.is_empty().await);
        assert_eq!(
            f.engine.cancel_calls(),
            vec![TrainingId::new("welcome-bot", "fr")]
        );
    }

    #[tokio::test]
    async fn test_cancel_without_running_training_is_noop() {
        let f = fixture();

        assert_ok!(f.orchestrator.cancel_training("fr").await);
        assert_eq!(f.engine.cancel_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_training_of_same_language_is_refused() {
        let f = fixture_with(MockEngine::new().with_blocking_training(), Vec::new());

        let orchestrator = f.orchestrator.clone();
        let training =
            tokio::spawn(async move { orchestrator.train("fr", ignore_progress()).await });
        f.engine.wait_training_started().await;

        let second = f.orchestrator.train("fr", ignore_progress()).await;
        assert!(matches!(second, Err(NluError::TrainingInProgress { .. })));

        f.engine.release_training();
        let model = training.await.unwrap().unwrap();

        assert_eq!(f.engine.training_calls().len(), 1);
        assert_eq!(f.orchestrator.loaded_model("fr").await, Some(model));
    }

    #[tokio::test]
    async fn test_predict_during_training_serves_previous_model() {
        let f = fixture_with(
            MockEngine::new().with_blocking_training(),
            vec![stored_model("01", "en", 1)],
        );
        let old = f.orchestrator.load_latest("en").await.unwrap();

        let orchestrator = f.orchestrator.clone();
        let training =
            tokio::spawn(async move { orchestrator.train("en", ignore_progress()).await });
        f.engine.wait_training_started().await;

        let during = f.orchestrator.predict("hello", None).await.unwrap();
        assert_eq!(&during.model_id, old.id());

        f.engine.release_training();
        let new = training.await.unwrap().unwrap();

        let after = f.orchestrator.predict("hello", None).await.unwrap();
        assert_eq!(&after.model_id, new.id());
    }

    #[tokio::test]
    async fn test_predict_requires_default_model_until_loaded() {
        let f = fixture_with(MockEngine::new(), vec![stored_model("01", "en", 1)]);

        let before = f.orchestrator.predict("hello", None).await;
        assert!(matches!(before, Err(NluError::NoModelAvailable { .. })));

        assert_ok!(f.orchestrator.load_latest("en").await);

        assert_ok!(f.orchestrator.predict("hello", None).await);
    }

    #[tokio::test]
    async fn test_load_latest_picks_most_recent() {
        let f = fixture_with(
            MockEngine::new(),
            vec![stored_model("01", "fr", 3), stored_model("02", "fr", 1)],
        );

        let model = f.orchestrator.load_latest("fr").await.unwrap();

        assert_eq!(model.id().content_hash(), "02");
        assert!(f.engine.is_loaded(model.id()));
    }

    #[tokio::test]
    async fn test_load_latest_without_models() {
        let f = fixture();

        let result = f.orchestrator.load_latest("fr").await;
        assert!(matches!(result, Err(NluError::ModelNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_missing_model_keeps_registry() {
        let f = fixture_with(MockEngine::new(), vec![stored_model("01", "fr", 1)]);
        let loaded = f.orchestrator.load_latest("fr").await.unwrap();

        let missing = ModelId::new("welcome-bot", "aa", "ff", "fr").unwrap();
        let result = f.orchestrator.load(&missing).await;

        assert!(matches!(result, Err(NluError::ModelNotFound { .. })));
        assert_eq!(f.orchestrator.loaded_model("fr").await, Some(loaded));
    }

    #[tokio::test]
    async fn test_load_by_id_replaces_entry() {
        let older = stored_model("01", "fr", 3);
        let f = fixture_with(
            MockEngine::new(),
            vec![older.clone(), stored_model("02", "fr", 1)],
        );
        f.orchestrator.load_latest("fr").await.unwrap();

        let model = f.orchestrator.load(older.id()).await.unwrap();

        assert_eq!(model.id(), older.id());
        assert_eq!(
            f.orchestrator.loaded_model("fr").await.map(|m| m.id().clone()),
            Some(older.id().clone())
        );
    }

    #[tokio::test]
    async fn test_load_model_of_unsupported_language() {
        let german = Model::new(
            ModelId::new("welcome-bot", "aa", "01", "de").unwrap(),
            Vec::new(),
        );
        let f = fixture_with(MockEngine::new(), vec![german.clone()]);

        let result = f.orchestrator.load(german.id()).await;
        assert!(matches!(result, Err(NluError::UnsupportedLanguage { .. })));

        let result = f.orchestrator.load_latest("de").await;
        assert!(matches!(result, Err(NluError::UnsupportedLanguage { .. })));

        assert!(f.engine.load_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unmount_unloads_and_clears_registry() {
        let f = fixture_with(
            MockEngine::new(),
            vec![stored_model("01", "en", 1), stored_model("02", "fr", 1)],
        );
        f.orchestrator.mount().await.unwrap();
        let en = f.orchestrator.load_latest("en").await.unwrap();
        let fr = f.orchestrator.load_latest("fr").await.unwrap();

        f.orchestrator.unmount().await.unwrap();

        assert!(f.orchestrator.loaded_models().await.is_empty());
        let unloaded = f.engine.unload_calls();
        assert_eq!(unloaded.len(), 2);
        assert!(unloaded.contains(en.id()));
        assert!(unloaded.contains(fr.id()));

        let result = f.orchestrator.predict("hello", Some("fr")).await;
        assert!(matches!(result, Err(NluError::NoModelAvailable { .. })));

        // Idempotent
        assert_ok!(f.orchestrator.unmount().await);
        assert_eq!(f.engine.unload_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_models_to_keep_is_configurable() {
        let engine = Arc::new(MockEngine::new());
        let repository = Arc::new(InMemoryModelRepository::new());
        let orchestrator = ModelOrchestrator::with_config(
            bot(),
            engine,
            repository.clone(),
            Arc::new(InMemoryDefinitionsProvider::with_sets(vec![french_set()])),
            OrchestratorConfig { models_to_keep: 1 },
        );

        orchestrator.train("fr", ignore_progress()).await.unwrap();
        let live = orchestrator.train("fr", ignore_progress()).await.unwrap();

        let remaining = repository.list_models(&ModelQuery::language("fr")).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), live.id());
    }
}
