//! Model entity and identifier types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::validation::{
    validate_bot_id, validate_hash, validate_language_code, ModelValidationError,
};

/// Identifier of one trained artifact.
///
/// Two ids are equal iff bot, language and both hashes match. The specification hash fingerprints
/// the training configuration, the content hash fingerprints the training data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId {
    bot_id: String,
    specification_hash: String,
    content_hash: String,
    language_code: String,
}

impl ModelId {
    /// Create a new ModelId after validation
    pub fn new(
        bot_id: impl Into<String>,
        specification_hash: impl Into<String>,
        content_hash: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Result<Self, ModelValidationError> {
        let bot_id = bot_id.into();
        let specification_hash = specification_hash.into();
        let content_hash = content_hash.into();
        let language_code = language_code.into();

        validate_bot_id(&bot_id)?;
        validate_hash("specification hash", &specification_hash)?;
        validate_hash("content hash", &content_hash)?;
        validate_language_code(&language_code)?;

        Ok(Self {
            bot_id,
            specification_hash,
            content_hash,
            language_code,
        })
    }

    /// Derive an id from the raw training specification and training data
    pub fn compute(
        bot_id: impl Into<String>,
        language_code: impl Into<String>,
        specification: &[u8],
        content: &[u8],
    ) -> Result<Self, ModelValidationError> {
        Self::new(
            bot_id,
            hex::encode(Sha256::digest(specification)),
            hex::encode(Sha256::digest(content)),
            language_code,
        )
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn specification_hash(&self) -> &str {
        &self.specification_hash
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.bot_id, self.specification_hash, self.content_hash, self.language_code
        )
    }
}

impl FromStr for ModelId {
    type Err = ModelValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split('.').collect();

        match parts.as_slice() {
            [bot_id, specification_hash, content_hash, language_code] => {
                Self::new(*bot_id, *specification_hash, *content_hash, *language_code)
            }
            _ => Err(ModelValidationError::MalformedModelId {
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ModelId {
    type Error = ModelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.to_string()
    }
}

/// A trained, immutable model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    id: ModelId,

    /// Opaque engine payload
    #[serde(with = "payload_base64")]
    payload: Vec<u8>,

    /// Creation timestamp, used for recency ordering and pruning
    created_at: DateTime<Utc>,
}

impl Model {
    pub fn new(id: ModelId, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            payload: payload.into(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style method to set the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    /// Language served by this model, always the language of its id
    pub fn language_code(&self) -> &str {
        self.id.language_code()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

mod payload_base64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
