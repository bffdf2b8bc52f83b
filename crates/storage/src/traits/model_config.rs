use async_trait::async_trait;
use inspira_core::{ModelConfig, ModelPurpose};

use crate::error::StorageError;

/// Model configuration persistence.
///
/// At most one config per purpose has `is_default` set: saving a default
/// clears the flag on the others of the same purpose.
#[async_trait]
pub trait ModelConfigStore: Send + Sync {
    async fn create_model_config(&self, config: &ModelConfig) -> Result<(), StorageError>;

    async fn get_model_config(&self, id: &str) -> Result<Option<ModelConfig>, StorageError>;

    async fn update_model_config(&self, config: &ModelConfig) -> Result<(), StorageError>;

    async fn delete_model_config(&self, id: &str) -> Result<bool, StorageError>;

    /// Ordered by purpose, then name.
    async fn list_model_configs(
        &self,
        purpose: Option<ModelPurpose>,
    ) -> Result<Vec<ModelConfig>, StorageError>;

    async fn get_default_model_config(
        &self,
        purpose: ModelPurpose,
    ) -> Result<Option<ModelConfig>, StorageError>;
}
