//! ScreenStore implementation for PgStorage.

use async_trait::async_trait;

use super::*;
use crate::traits::ScreenStore;

#[async_trait]
impl ScreenStore for PgStorage {
    async fn create_screen(&self, screen: &Screen) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO screens ({SCREEN_COLUMNS}, tag_keys)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(&screen.id)
        .bind(&screen.project_id)
        .bind(&screen.name)
        .bind(&screen.image_url)
        .bind(&screen.description)
        .bind(serde_json::to_value(&screen.tags)?)
        .bind(screen.created_at)
        .bind(screen.updated_at)
        .bind(tag_keys(&screen.tags))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_screen(&self, id: &str) -> Result<Option<Screen>, StorageError> {
        let row = sqlx::query(&format!("SELECT {SCREEN_COLUMNS} FROM screens WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_screen).transpose()
    }

    async fn update_screen(&self, screen: &Screen) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE screens
             SET project_id = $2, name = $3, image_url = $4, description = $5,
                 tags = $6, tag_keys = $7, updated_at = $8
             WHERE id = $1",
        )
        .bind(&screen.id)
        .bind(&screen.project_id)
        .bind(&screen.name)
        .bind(&screen.image_url)
        .bind(&screen.description)
        .bind(serde_json::to_value(&screen.tags)?)
        .bind(tag_keys(&screen.tags))
        .bind(screen.updated_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("screen", &screen.id));
        }
        Ok(())
    }

    async fn delete_screen(&self, id: &str) -> Result<bool, StorageError> {
        let result =
            sqlx::query("DELETE FROM screens WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_screens(
        &self,
        project_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {SCREEN_COLUMNS} FROM screens
             WHERE ($1::text IS NULL OR project_id = $1)
             ORDER BY updated_at DESC, id ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(project_id)
        .bind(usize_to_i64(limit))
        .bind(usize_to_i64(offset))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_screen).collect()
    }

    async fn count_screens(&self, project_id: Option<&str>) -> Result<usize, StorageError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM screens WHERE ($1::text IS NULL OR project_id = $1)",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(i64_to_usize(count))
    }

    async fn find_screens_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        if tag_keys.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!(
            "SELECT {SCREEN_COLUMNS} FROM screens
             WHERE {ANY_TAG_OVERLAP_SQL}
             ORDER BY updated_at DESC, id ASC
             LIMIT $2"
        ))
        .bind(tag_keys)
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_screen).collect()
    }

    async fn find_screens_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {SCREEN_COLUMNS} FROM screens
             WHERE tag_keys @> $1::text[]
             ORDER BY updated_at DESC, id ASC
             LIMIT $2"
        ))
        .bind(tag_keys)
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_screen).collect()
    }
}
