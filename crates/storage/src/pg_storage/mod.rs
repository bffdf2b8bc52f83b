//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by record kind.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod favorites;
mod model_configs;
mod projects;
mod screens;

use chrono::{DateTime, Utc};
use inspira_core::{
    Favorite, FavoriteTarget, ModelConfig, ModelPurpose, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, Platform, Project, Screen, tag_key,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(max_connections, "PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Lowercased, trimmed tag keys stored next to the display tags.
pub(crate) fn tag_keys(tags: &[String]) -> Vec<String> {
    tags.iter().map(|t| tag_key(t)).filter(|k| !k.is_empty()).collect()
}

pub(crate) fn parse_tags(val: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(val.clone()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "corrupt tags column, treating as empty");
        Vec::new()
    })
}

/// Convert `usize` to `i64` for SQL LIMIT/OFFSET binds.
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn i64_to_usize(val: i64) -> usize {
    usize::try_from(val).unwrap_or(0)
}

pub(crate) fn row_to_project(row: &PgRow) -> Result<Project, StorageError> {
    let platform_str: String = row.try_get("platform")?;
    let platform = platform_str.parse::<Platform>().unwrap_or_else(|_| {
        tracing::warn!(invalid_platform = %platform_str, "corrupt platform in DB, defaulting to Other");
        Platform::Other
    });
    let tags: serde_json::Value = row.try_get("tags")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Project {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        platform,
        tags: parse_tags(&tags),
        cover_url: row.try_get("cover_url")?,
        created_at,
        updated_at,
    })
}

pub(crate) fn row_to_screen(row: &PgRow) -> Result<Screen, StorageError> {
    let tags: serde_json::Value = row.try_get("tags")?;
    Ok(Screen {
        id: row.try_get("id")?,
        project_id: row.try_get("project_id")?,
        name: row.try_get("name")?,
        image_url: row.try_get("image_url")?,
        description: row.try_get("description")?,
        tags: parse_tags(&tags),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn row_to_favorite(row: &PgRow) -> Result<Favorite, StorageError> {
    let target: FavoriteTarget = row.try_get::<String, _>("target")?.parse()?;
    Ok(Favorite {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        target,
        target_id: row.try_get("target_id")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_model_config(row: &PgRow) -> Result<ModelConfig, StorageError> {
    let purpose: ModelPurpose = row.try_get::<String, _>("purpose")?.parse()?;
    Ok(ModelConfig {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        purpose,
        model: row.try_get("model")?,
        base_url: row.try_get("base_url")?,
        api_key: row.try_get("api_key")?,
        temperature: row.try_get("temperature")?,
        is_default: row.try_get("is_default")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Row filter shared by the OR-prefetch queries: `$1` is the `TEXT[]` of
/// query keys. Mirrors `inspira_core::is_partial_match`.
pub(crate) const ANY_TAG_OVERLAP_SQL: &str = "EXISTS (
    SELECT 1 FROM unnest(tag_keys) AS k, unnest($1::text[]) AS q
    WHERE k = q
       OR (char_length(q) <= char_length(k) AND char_length(q) >= 2 AND strpos(k, q) > 0)
       OR (char_length(k) < char_length(q) AND char_length(k) >= 2 AND strpos(q, k) > 0)
)";

pub(crate) const PROJECT_COLUMNS: &str =
    "id, name, description, platform, tags, cover_url, created_at, updated_at";

pub(crate) const SCREEN_COLUMNS: &str =
    "id, project_id, name, image_url, description, tags, created_at, updated_at";

pub(crate) const FAVORITE_COLUMNS: &str = "id, user_id, target, target_id, created_at";

pub(crate) const MODEL_CONFIG_COLUMNS: &str =
    "id, name, purpose, model, base_url, api_key, temperature, is_default, created_at, updated_at";
