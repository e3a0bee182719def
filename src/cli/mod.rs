//! CLI module for bot-nlu
//!
//! Maintenance commands over the persisted models of one bot:
//! - `list`: models of a language, newest first
//! - `latest`: most recent model of a language
//! - `show`: metadata of one model
//! - `prune`: delete old models of a language

pub mod models;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bot-nlu - NLU model maintenance for a bot
#[derive(Parser)]
#[command(name = "bot-nlu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Bot whose models are managed
    #[arg(long)]
    pub bot: String,

    /// Models root directory, overrides `storage.models_dir`
    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the models of a language, newest first
    List {
        #[arg(long)]
        lang: String,
    },

    /// Show the most recent model of a language
    Latest {
        #[arg(long)]
        lang: String,
    },

    /// Show one model by ID
    Show { model_id: String },

    /// Delete all but the most recent models of a language
    Prune {
        #[arg(long)]
        lang: String,

        /// Models to keep, defaults to `training.models_to_keep`
        #[arg(long)]
        keep: Option<usize>,
    },
}
