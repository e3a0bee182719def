//! Model identifier validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for bot IDs
pub const MAX_BOT_ID_LENGTH: usize = 50;

/// Maximum length of a specification or content hash (hex-encoded SHA-256)
pub const MAX_HASH_LENGTH: usize = 64;

/// Bot IDs: alphanumeric, hyphens and underscores; no `.` or `:` as those delimit model and
/// training identifiers
static BOT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*$").unwrap());

/// ISO 639 language code with optional subtags (e.g. `en`, `fr`, `pt-BR`)
static LANGUAGE_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(-[a-zA-Z0-9]{2,8})*$").unwrap());

static HASH_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]+$").unwrap());

/// Model identifier validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Bot ID is empty
    EmptyBotId,
    /// Bot ID exceeds maximum length
    BotIdTooLong { length: usize, max: usize },
    /// Bot ID contains invalid characters
    InvalidBotIdFormat { id: String },
    /// Language code is not a valid ISO 639 code
    InvalidLanguageCode { code: String },
    /// Specification or content hash is not lowercase hex
    InvalidHash { field: &'static str, value: String },
    /// String form of a model ID could not be parsed
    MalformedModelId { value: String },
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBotId => write!(f, "Bot ID cannot be empty"),
            Self::BotIdTooLong { length, max } => {
                write!(f, "Bot ID too long: {} characters (max {})", length, max)
            }
            Self::InvalidBotIdFormat { id } => {
                write!(
                    f,
                    "Invalid bot ID format '{}': must be alphanumeric with hyphens or underscores",
                    id
                )
            }
            Self::InvalidLanguageCode { code } => {
                write!(f, "Invalid language code '{}'", code)
            }
            Self::InvalidHash { field, value } => {
                write!(
                    f,
                    "Invalid {} '{}': must be 1 to {} lowercase hex characters",
                    field, value, MAX_HASH_LENGTH
                )
            }
            Self::MalformedModelId { value } => {
                write!(
                    f,
                    "Malformed model ID '{}': expected '<bot>.<specification>.<content>.<language>'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ModelValidationError {}

/// Validate a bot ID
pub fn validate_bot_id(id: &str) -> Result<(), ModelValidationError> {
    if id.is_empty() {
        return Err(ModelValidationError::EmptyBotId);
    }

    if id.len() > MAX_BOT_ID_LENGTH {
        return Err(ModelValidationError::BotIdTooLong {
            length: id.len(),
            max: MAX_BOT_ID_LENGTH,
        });
    }

    if !BOT_ID_PATTERN.is_match(id) {
        return Err(ModelValidationError::InvalidBotIdFormat { id: id.to_string() });
    }

    Ok(())
}

/// Validate a language code
pub fn validate_language_code(code: &str) -> Result<(), ModelValidationError> {
    if !LANGUAGE_CODE_PATTERN.is_match(code) {
        return Err(ModelValidationError::InvalidLanguageCode {
            code: code.to_string(),
        });
    }

    Ok(())
}

/// Validate a specification or content hash
pub fn validate_hash(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.len() > MAX_HASH_LENGTH || !HASH_PATTERN.is_match(value) {
        return Err(ModelValidationError::InvalidHash {
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}
