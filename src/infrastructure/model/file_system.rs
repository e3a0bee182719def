//! File system model repository
//!
//! Layout: `{models_dir}/{bot_id}/{model_id}.model`, one JSON artifact per model.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::error::DomainError;
use crate::domain::model::{
    select_models_to_prune, Model, ModelId, ModelQuery, ModelRepository, PruneOptions,
};

const MODEL_EXTENSION: &str = "model";

/// Model repository storing artifacts of one bot on the local file system
#[derive(Debug, Clone)]
pub struct FileSystemModelRepository {
    bot_dir: PathBuf,
    bot_id: String,
}

impl FileSystemModelRepository {
    pub fn new(models_dir: impl AsRef<Path>, bot_id: impl Into<String>) -> Self {
        let bot_id = bot_id.into();
        Self {
            bot_dir: models_dir.as_ref().join(&bot_id),
            bot_id,
        }
    }

    pub fn bot_dir(&self) -> &Path {
        &self.bot_dir
    }

    fn model_path(&self, id: &ModelId) -> PathBuf {
        self.bot_dir.join(format!("{}.{}", id, MODEL_EXTENSION))
    }

    /// Parse the model ID encoded in an artifact file name
    fn parse_file_name(&self, path: &Path) -> Option<ModelId> {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(&format!(".{}", MODEL_EXTENSION))?;

        match stem.parse::<ModelId>() {
            Ok(id) if id.bot_id() == self.bot_id => Some(id),
            Ok(_) => None,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Ignoring unrecognized model file");
                None
            }
        }
    }

    async fn read_model(&self, path: &Path) -> Result<Option<Model>, DomainError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// IDs of stored artifacts matching the query, without reading their content
    async fn list_ids(&self, query: &ModelQuery) -> Result<Vec<ModelId>, DomainError> {
        let mut entries = match fs::read_dir(&self.bot_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(id) = self.parse_file_name(&entry.path()) {
                if id.language_code() == query.language_code {
                    ids.push(id);
                }
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl ModelRepository for FileSystemModelRepository {
    async fn initialize(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.bot_dir).await?;
        info!(path = %self.bot_dir.display(), "Model repository initialized");
        Ok(())
    }

    async fn teardown(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_model(&self, id: &ModelId) -> Result<Option<Model>, DomainError> {
        if id.bot_id() != self.bot_id {
            return Ok(None);
        }
        self.read_model(&self.model_path(id)).await
    }

    async fn get_latest_model(&self, query: &ModelQuery) -> Result<Option<Model>, DomainError> {
        let models = self.list_models(query).await?;
        Ok(models.into_iter().max_by_key(|m| (m.created_at(), m.id().to_string())))
    }

    async fn save_model(&self, model: &Model) -> Result<(), DomainError> {
        if model.id().bot_id() != self.bot_id {
            return Err(DomainError::validation(format!(
                "Model '{}' does not belong to bot '{}'",
                model.id(),
                self.bot_id
            )));
        }

        let path = self.model_path(model.id());
        let tmp_path = path.with_extension("tmp");
        let bytes = serde_json::to_vec(model)?;

        // Write-then-rename so readers never see a partial artifact
        fs::write(&tmp_path, bytes).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!(model_id = %model.id(), path = %path.display(), "Saved model");
        Ok(())
    }

    async fn list_models(&self, query: &ModelQuery) -> Result<Vec<Model>, DomainError> {
        let mut models = Vec::new();

        for id in self.list_ids(query).await? {
            // A concurrent prune may remove the file between listing and reading
            if let Some(model) = self.read_model(&self.model_path(&id)).await? {
                models.push(model);
            }
        }

        Ok(models)
    }

    async fn prune_models(
        &self,
        models: Vec<Model>,
        options: &PruneOptions,
    ) -> Result<Vec<ModelId>, DomainError> {
        let to_delete = select_models_to_prune(&models, options);

        for id in &to_delete {
            match fs::remove_file(self.model_path(id)).await {
                Ok(()) => debug!(model_id = %id, "Pruned model"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(to_delete)
    }
}
