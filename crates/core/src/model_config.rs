use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which workflow a model configuration serves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModelPurpose {
    Chat,
    Image,
    Tagging,
}

impl ModelPurpose {
    pub const ALL_VARIANTS: &'static [ModelPurpose] =
        &[ModelPurpose::Chat, ModelPurpose::Image, ModelPurpose::Tagging];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Chat => "chat",
            Self::Image => "image",
            Self::Tagging => "tagging",
        }
    }
}

impl FromStr for ModelPurpose {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(Self::Chat),
            "image" => Ok(Self::Image),
            "tagging" => Ok(Self::Tagging),
            other => Err(CoreError::InvalidInput(format!(
                "unknown model purpose '{other}', expected chat|image|tagging"
            ))),
        }
    }
}

const REDACTED: &str = "***";

/// Stored credentials and model choice for one Gemini workflow.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub id: String,
    pub name: String,
    pub purpose: ModelPurpose,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub temperature: Option<f32>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("purpose", &self.purpose)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("temperature", &self.temperature)
            .field("is_default", &self.is_default)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfigInput {
    pub name: String,
    pub purpose: ModelPurpose,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfigPatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub is_default: Option<bool>,
}

impl ModelConfig {
    #[must_use]
    pub fn from_input(input: ModelConfigInput) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            purpose: input.purpose,
            model: input.model,
            base_url: input.base_url.trim_end_matches('/').to_owned(),
            api_key: input.api_key,
            temperature: input.temperature,
            is_default: input.is_default,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ModelConfigPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(base_url) = patch.base_url {
            self.base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(api_key) = patch.api_key {
            self.api_key = api_key;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = Some(temperature);
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
        self.updated_at = Utc::now();
    }

    /// Copy with the API key masked, safe to print or return to callers.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self { api_key: REDACTED.to_owned(), ..self.clone() }
    }
}
