//! Model maintenance commands over the file system repository

use std::io::Write;

use anyhow::Context;
use serde_json::json;

use super::{Cli, Command};
use crate::config::AppConfig;
use crate::domain::model::validate_bot_id;
use crate::domain::{Model, ModelId, ModelQuery, ModelRepository, PruneOptions};
use crate::infrastructure::FileSystemModelRepository;

/// Run a maintenance command, writing its report to `out`
pub async fn run(cli: Cli, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    validate_bot_id(&cli.bot)?;

    let models_dir = cli
        .models_dir
        .unwrap_or_else(|| config.storage.models_dir.clone());
    let repository = FileSystemModelRepository::new(models_dir, &cli.bot);
    repository
        .initialize()
        .await
        .context("Failed to open model repository")?;

    let result = execute(cli.command, config, &repository, out).await;
    repository.teardown().await?;
    result
}

async fn execute(
    command: Command,
    config: &AppConfig,
    repository: &FileSystemModelRepository,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List { lang } => {
            let mut models = repository.list_models(&ModelQuery::language(&lang)).await?;
            models.sort_by_key(|m| std::cmp::Reverse(m.created_at()));

            if models.is_empty() {
                writeln!(out, "No models for language '{}'", lang)?;
            }
            for model in &models {
                writeln!(out, "{}", summary_line(model))?;
            }
        }
        Command::Latest { lang } => {
            let model = repository
                .get_latest_model(&ModelQuery::language(&lang))
                .await?
                .with_context(|| format!("No model found for language '{}'", lang))?;
            writeln!(out, "{}", summary_line(&model))?;
        }
        Command::Show { model_id } => {
            let id: ModelId = model_id.parse()?;
            let model = repository
                .get_model(&id)
                .await?
                .with_context(|| format!("Model '{}' not found", id))?;

            let details = json!({
                "id": model.id(),
                "bot_id": model.id().bot_id(),
                "language_code": model.language_code(),
                "specification_hash": model.id().specification_hash(),
                "content_hash": model.id().content_hash(),
                "created_at": model.created_at(),
                "payload_bytes": model.payload().len(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&details)?)?;
        }
        Command::Prune { lang, keep } => {
            let keep = keep.unwrap_or(config.training.models_to_keep);
            let query = ModelQuery::language(&lang);

            let models = repository.list_models(&query).await?;
            let mut options = PruneOptions::keep(keep);
            if let Some(latest) = repository.get_latest_model(&query).await? {
                options = options.with_protected(latest.id().clone());
            }

            let deleted = repository.prune_models(models, &options).await?;
            for id in &deleted {
                writeln!(out, "deleted {}", id)?;
            }
            writeln!(out, "Pruned {} model(s), kept {}", deleted.len(), keep)?;
        }
    }

    Ok(())
}

fn summary_line(model: &Model) -> String {
    format!(
        "{}  {}  {} bytes",
        model.created_at().to_rfc3339(),
        model.id(),
        model.payload().len()
    )
}
