//! Bot domain - per-bot NLU configuration and orchestration errors

mod entity;
mod error;

pub use entity::BotDefinition;
pub use error::NluError;
