use std::sync::Arc;

use inspira_core::{EnvSettings, ModelConfig, ModelConfigInput, ModelConfigPatch, ModelPurpose};
use inspira_llm::GeminiClient;
use inspira_storage::StorageBackend;
use inspira_storage::traits::ModelConfigStore;

use crate::ServiceError;
use crate::validation::required;

pub struct ModelConfigService {
    storage: Arc<StorageBackend>,
    settings: EnvSettings,
}

fn validate_temperature(temperature: Option<f32>) -> Result<(), ServiceError> {
    match temperature {
        Some(t) if !(0.0..=2.0).contains(&t) => {
            Err(ServiceError::InvalidInput(format!("temperature {t} is outside [0, 2]")))
        },
        _ => Ok(()),
    }
}

impl ModelConfigService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, settings: EnvSettings) -> Self {
        Self { storage, settings }
    }

    pub async fn create(&self, input: ModelConfigInput) -> Result<ModelConfig, ServiceError> {
        validate_temperature(input.temperature)?;
        let input = ModelConfigInput {
            name: required("name", &input.name)?,
            model: required("model", &input.model)?,
            base_url: required("base_url", &input.base_url)?,
            api_key: required("api_key", &input.api_key)?,
            ..input
        };
        let config = ModelConfig::from_input(input);
        self.storage.create_model_config(&config).await?;
        tracing::info!(
            id = %config.id,
            purpose = config.purpose.as_str(),
            model = %config.model,
            is_default = config.is_default,
            "model config created"
        );
        Ok(config.redacted())
    }

    pub async fn get(&self, id: &str) -> Result<Option<ModelConfig>, ServiceError> {
        Ok(self.storage.get_model_config(id).await?.as_ref().map(ModelConfig::redacted))
    }

    /// Configs with the API key masked; only `resolve_client` sees the stored key.
    pub async fn list(
        &self,
        purpose: Option<ModelPurpose>,
    ) -> Result<Vec<ModelConfig>, ServiceError> {
        let configs = self.storage.list_model_configs(purpose).await?;
        Ok(configs.iter().map(ModelConfig::redacted).collect())
    }

    pub async fn update(
        &self,
        id: &str,
        patch: ModelConfigPatch,
    ) -> Result<ModelConfig, ServiceError> {
        validate_temperature(patch.temperature)?;
        let mut config = self
            .storage
            .get_model_config(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("model config", id))?;
        let patch = ModelConfigPatch {
            name: patch.name.as_deref().map(|v| required("name", v)).transpose()?,
            model: patch.model.as_deref().map(|v| required("model", v)).transpose()?,
            base_url: patch.base_url.as_deref().map(|v| required("base_url", v)).transpose()?,
            api_key: patch.api_key.as_deref().map(|v| required("api_key", v)).transpose()?,
            ..patch
        };
        config.apply(patch);
        self.storage.update_model_config(&config).await?;
        tracing::info!(id = %config.id, "model config updated");
        Ok(config.redacted())
    }

    /// Make `id` the default for its purpose, demoting the previous default.
    pub async fn set_default(&self, id: &str) -> Result<ModelConfig, ServiceError> {
        self.update(id, ModelConfigPatch { is_default: Some(true), ..ModelConfigPatch::default() })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.storage.delete_model_config(id).await?)
    }

    fn env_model(&self, purpose: ModelPurpose) -> &str {
        match purpose {
            ModelPurpose::Chat => &self.settings.chat_model,
            ModelPurpose::Image => &self.settings.image_model,
            ModelPurpose::Tagging => &self.settings.tagging_model,
        }
    }

    /// Client for `purpose`: the stored default config if there is one,
    /// else the environment API key with the purpose's env model.
    pub async fn resolve_client(&self, purpose: ModelPurpose) -> Result<GeminiClient, ServiceError> {
        if let Some(config) = self.storage.get_default_model_config(purpose).await? {
            tracing::debug!(purpose = purpose.as_str(), model = %config.model, "using stored model config");
            return Ok(GeminiClient::from_model_config(&config)?);
        }
        let Some(api_key) = self.settings.gemini_api_key.clone() else {
            return Err(ServiceError::NotConfigured(format!(
                "no default {} model config and INSPIRA_GEMINI_API_KEY is not set",
                purpose.as_str()
            )));
        };
        let model = self.env_model(purpose).to_owned();
        tracing::debug!(purpose = purpose.as_str(), model = %model, "using environment model");
        Ok(GeminiClient::new(api_key, self.settings.gemini_base_url.clone())?.with_model(model))
    }
}
