//! ModelConfigStore implementation for PgStorage.

use async_trait::async_trait;

use super::*;
use crate::traits::ModelConfigStore;

#[async_trait]
impl ModelConfigStore for PgStorage {
    async fn create_model_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        if config.is_default {
            sqlx::query("UPDATE model_configs SET is_default = FALSE WHERE purpose = $1")
                .bind(config.purpose.as_str())
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(&format!(
            "INSERT INTO model_configs ({MODEL_CONFIG_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
        ))
        .bind(&config.id)
        .bind(&config.name)
        .bind(config.purpose.as_str())
        .bind(&config.model)
        .bind(&config.base_url)
        .bind(&config.api_key)
        .bind(config.temperature)
        .bind(config.is_default)
        .bind(config.created_at)
        .bind(config.updated_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_model_config(&self, id: &str) -> Result<Option<ModelConfig>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {MODEL_CONFIG_COLUMNS} FROM model_configs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_model_config).transpose()
    }

    async fn update_model_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        if config.is_default {
            sqlx::query(
                "UPDATE model_configs SET is_default = FALSE WHERE purpose = $1 AND id <> $2",
            )
            .bind(config.purpose.as_str())
            .bind(&config.id)
            .execute(&mut *tx)
            .await?;
        }
        let result = sqlx::query(
            "UPDATE model_configs
             SET name = $2, model = $3, base_url = $4, api_key = $5, temperature = $6,
                 is_default = $7, updated_at = $8
             WHERE id = $1",
        )
        .bind(&config.id)
        .bind(&config.name)
        .bind(&config.model)
        .bind(&config.base_url)
        .bind(&config.api_key)
        .bind(config.temperature)
        .bind(config.is_default)
        .bind(config.updated_at)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("model config", &config.id));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_model_config(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM model_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_model_configs(
        &self,
        purpose: Option<ModelPurpose>,
    ) -> Result<Vec<ModelConfig>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {MODEL_CONFIG_COLUMNS} FROM model_configs
             WHERE ($1::text IS NULL OR purpose = $1)
             ORDER BY purpose ASC, name ASC"
        ))
        .bind(purpose.map(|p| p.as_str()))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_model_config).collect()
    }

    async fn get_default_model_config(
        &self,
        purpose: ModelPurpose,
    ) -> Result<Option<ModelConfig>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {MODEL_CONFIG_COLUMNS} FROM model_configs
             WHERE purpose = $1 AND is_default
             LIMIT 1"
        ))
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_model_config).transpose()
    }
}
