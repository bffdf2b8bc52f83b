//! Unified storage backend with enum dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use inspira_core::{Favorite, FavoriteTarget, ModelConfig, ModelPurpose, Project, Screen};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{FavoriteStore, ModelConfigStore, ProjectStore, ScreenStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(Arc<MemoryStorage>),
}

impl StorageBackend {
    pub async fn new_postgres(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url, max_connections).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(Arc::new(MemoryStorage::new()))
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── ProjectStore ─────────────────────────────────────────────────

#[async_trait]
impl ProjectStore for StorageBackend {
    async fn create_project(&self, project: &Project) -> Result<(), StorageError> {
        dispatch!(self, ProjectStore, create_project(project))
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError> {
        dispatch!(self, ProjectStore, get_project(id))
    }

    async fn update_project(&self, project: &Project) -> Result<(), StorageError> {
        dispatch!(self, ProjectStore, update_project(project))
    }

    async fn delete_project(&self, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, ProjectStore, delete_project(id))
    }

    async fn list_projects(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        dispatch!(self, ProjectStore, list_projects(offset, limit))
    }

    async fn count_projects(&self) -> Result<usize, StorageError> {
        dispatch!(self, ProjectStore, count_projects())
    }

    async fn find_projects_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        dispatch!(self, ProjectStore, find_projects_matching_any_tag(tag_keys, limit))
    }

    async fn find_projects_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        dispatch!(self, ProjectStore, find_projects_with_all_tags(tag_keys, limit))
    }
}

// ── ScreenStore ──────────────────────────────────────────────────

#[async_trait]
impl ScreenStore for StorageBackend {
    async fn create_screen(&self, screen: &Screen) -> Result<(), StorageError> {
        dispatch!(self, ScreenStore, create_screen(screen))
    }

    async fn get_screen(&self, id: &str) -> Result<Option<Screen>, StorageError> {
        dispatch!(self, ScreenStore, get_screen(id))
    }

    async fn update_screen(&self, screen: &Screen) -> Result<(), StorageError> {
        dispatch!(self, ScreenStore, update_screen(screen))
    }

    async fn delete_screen(&self, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, ScreenStore, delete_screen(id))
    }

    async fn list_screens(
        &self,
        project_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        dispatch!(self, ScreenStore, list_screens(project_id, offset, limit))
    }

    async fn count_screens(&self, project_id: Option<&str>) -> Result<usize, StorageError> {
        dispatch!(self, ScreenStore, count_screens(project_id))
    }

    async fn find_screens_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        dispatch!(self, ScreenStore, find_screens_matching_any_tag(tag_keys, limit))
    }

    async fn find_screens_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        dispatch!(self, ScreenStore, find_screens_with_all_tags(tag_keys, limit))
    }
}

// ── FavoriteStore ────────────────────────────────────────────────

#[async_trait]
impl FavoriteStore for StorageBackend {
    async fn add_favorite(&self, favorite: &Favorite) -> Result<Favorite, StorageError> {
        dispatch!(self, FavoriteStore, add_favorite(favorite))
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError> {
        dispatch!(self, FavoriteStore, remove_favorite(user_id, target, target_id))
    }

    async fn list_favorites(
        &self,
        user_id: &str,
        target: Option<FavoriteTarget>,
    ) -> Result<Vec<Favorite>, StorageError> {
        dispatch!(self, FavoriteStore, list_favorites(user_id, target))
    }

    async fn is_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError> {
        dispatch!(self, FavoriteStore, is_favorite(user_id, target, target_id))
    }
}

// ── ModelConfigStore ─────────────────────────────────────────────

#[async_trait]
impl ModelConfigStore for StorageBackend {
    async fn create_model_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        dispatch!(self, ModelConfigStore, create_model_config(config))
    }

    async fn get_model_config(&self, id: &str) -> Result<Option<ModelConfig>, StorageError> {
        dispatch!(self, ModelConfigStore, get_model_config(id))
    }

    async fn update_model_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        dispatch!(self, ModelConfigStore, update_model_config(config))
    }

    async fn delete_model_config(&self, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, ModelConfigStore, delete_model_config(id))
    }

    async fn list_model_configs(
        &self,
        purpose: Option<ModelPurpose>,
    ) -> Result<Vec<ModelConfig>, StorageError> {
        dispatch!(self, ModelConfigStore, list_model_configs(purpose))
    }

    async fn get_default_model_config(
        &self,
        purpose: ModelPurpose,
    ) -> Result<Option<ModelConfig>, StorageError> {
        dispatch!(self, ModelConfigStore, get_default_model_config(purpose))
    }
}
