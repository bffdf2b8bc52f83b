//! FavoriteStore implementation for PgStorage.

use async_trait::async_trait;

use super::*;
use crate::traits::FavoriteStore;

#[async_trait]
impl FavoriteStore for PgStorage {
    async fn add_favorite(&self, favorite: &Favorite) -> Result<Favorite, StorageError> {
        let inserted = sqlx::query(&format!(
            "INSERT INTO favorites ({FAVORITE_COLUMNS})
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, target, target_id) DO NOTHING
             RETURNING {FAVORITE_COLUMNS}"
        ))
        .bind(&favorite.id)
        .bind(&favorite.user_id)
        .bind(favorite.target.as_str())
        .bind(&favorite.target_id)
        .bind(favorite.created_at)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = inserted {
            return row_to_favorite(&row);
        }

        let existing = sqlx::query(&format!(
            "SELECT {FAVORITE_COLUMNS} FROM favorites
             WHERE user_id = $1 AND target = $2 AND target_id = $3"
        ))
        .bind(&favorite.user_id)
        .bind(favorite.target.as_str())
        .bind(&favorite.target_id)
        .fetch_one(&self.pool)
        .await?;
        row_to_favorite(&existing)
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND target = $2 AND target_id = $3",
        )
        .bind(user_id)
        .bind(target.as_str())
        .bind(target_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_favorites(
        &self,
        user_id: &str,
        target: Option<FavoriteTarget>,
    ) -> Result<Vec<Favorite>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {FAVORITE_COLUMNS} FROM favorites
             WHERE user_id = $1 AND ($2::text IS NULL OR target = $2)
             ORDER BY created_at DESC, id ASC"
        ))
        .bind(user_id)
        .bind(target.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_favorite).collect()
    }

    async fn is_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM favorites WHERE user_id = $1 AND target = $2 AND target_id = $3
             )",
        )
        .bind(user_id)
        .bind(target.as_str())
        .bind(target_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
