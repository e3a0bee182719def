//! Bot definition entity

use crate::domain::model::{validate_bot_id, validate_language_code};
use crate::domain::DomainError;

/// Immutable per-bot NLU configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotDefinition {
    bot_id: String,
    default_language: String,
    languages: Vec<String>,
}

impl BotDefinition {
    /// Create a validated bot definition.
    ///
    /// Duplicate languages are collapsed, keeping first-seen order. The default language must be
    /// one of `languages`.
    pub fn new<I, L>(
        bot_id: impl Into<String>,
        default_language: impl Into<String>,
        languages: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let bot_id = bot_id.into();
        let default_language = default_language.into();

        validate_bot_id(&bot_id).map_err(|e| DomainError::validation(e.to_string()))?;

        let mut unique: Vec<String> = Vec::new();
        for language in languages {
            let language = language.into();
            validate_language_code(&language)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            if !unique.contains(&language) {
                unique.push(language);
            }
        }

        if !unique.contains(&default_language) {
            return Err(DomainError::validation(format!(
                "Default language '{}' is not among the languages of bot '{}'",
                default_language, bot_id
            )));
        }

        Ok(Self {
            bot_id,
            default_language,
            languages: unique,
        })
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Whether the bot is configured for the given language
    pub fn speaks(&self, language_code: &str) -> bool {
        self.languages.iter().any(|l| l == language_code)
    }
}
