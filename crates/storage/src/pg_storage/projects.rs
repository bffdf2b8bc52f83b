//! ProjectStore implementation for PgStorage.

use async_trait::async_trait;

use super::*;
use crate::traits::ProjectStore;

#[async_trait]
impl ProjectStore for PgStorage {
    async fn create_project(&self, project: &Project) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO projects ({PROJECT_COLUMNS}, tag_keys)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.platform.as_str())
        .bind(serde_json::to_value(&project.tags)?)
        .bind(&project.cover_url)
        .bind(project.created_at)
        .bind(project.updated_at)
        .bind(tag_keys(&project.tags))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError> {
        let row = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_project).transpose()
    }

    async fn update_project(&self, project: &Project) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE projects
             SET name = $2, description = $3, platform = $4, tags = $5, tag_keys = $6,
                 cover_url = $7, updated_at = $8
             WHERE id = $1",
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.platform.as_str())
        .bind(serde_json::to_value(&project.tags)?)
        .bind(tag_keys(&project.tags))
        .bind(&project.cover_url)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("project", &project.id));
        }
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_projects(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             ORDER BY updated_at DESC, id ASC
             LIMIT $1 OFFSET $2"
        ))
        .bind(usize_to_i64(limit))
        .bind(usize_to_i64(offset))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_project).collect()
    }

    async fn count_projects(&self) -> Result<usize, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(i64_to_usize(count))
    }

    async fn find_projects_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        if tag_keys.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE {ANY_TAG_OVERLAP_SQL}
             ORDER BY updated_at DESC, id ASC
             LIMIT $2"
        ))
        .bind(tag_keys)
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_project).collect()
    }

    async fn find_projects_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE tag_keys @> $1::text[]
             ORDER BY updated_at DESC, id ASC
             LIMIT $2"
        ))
        .bind(tag_keys)
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_project).collect()
    }
}
