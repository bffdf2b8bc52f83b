//! In-process backend with the same semantics as `PgStorage`.
//!
//! Used by tests and by the CLI when no database URL is configured.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use inspira_core::{
    Favorite, FavoriteTarget, ModelConfig, ModelPurpose, Project, Screen, Taggable,
    is_partial_match, tag_key,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{FavoriteStore, ModelConfigStore, ProjectStore, ScreenStore};

#[derive(Default)]
struct Collections {
    projects: HashMap<String, Project>,
    screens: HashMap<String, Screen>,
    favorites: Vec<Favorite>,
    model_configs: HashMap<String, ModelConfig>,
}

#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Collections>,
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage").finish_non_exhaustive()
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T: Taggable>(a: &T, b: &T) -> Ordering {
    b.updated_at().cmp(&a.updated_at()).then_with(|| a.id().cmp(b.id()))
}

fn matches_any<T: Taggable>(item: &T, tag_keys: &[String]) -> bool {
    item.tags().iter().map(|t| tag_key(t)).any(|key| {
        tag_keys.iter().any(|q| *q == key || is_partial_match(q, &key))
    })
}

fn has_all<T: Taggable>(item: &T, tag_keys: &[String]) -> bool {
    let keys: Vec<String> = item.tags().iter().map(|t| tag_key(t)).collect();
    tag_keys.iter().all(|q| keys.contains(q))
}

fn sorted_page<T: Taggable + Clone>(
    items: impl Iterator<Item = T>,
    offset: usize,
    limit: usize,
) -> Vec<T> {
    let mut all: Vec<T> = items.collect();
    all.sort_by(newest_first);
    all.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl ProjectStore for MemoryStorage {
    async fn create_project(&self, project: &Project) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.projects.contains_key(&project.id) {
            return Err(StorageError::Duplicate(format!("project {}", project.id)));
        }
        inner.projects.insert(project.id.clone(), project.clone());
        Ok(())
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError> {
        Ok(self.inner.read().await.projects.get(id).cloned())
    }

    async fn update_project(&self, project: &Project) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        match inner.projects.get_mut(&project.id) {
            Some(existing) => {
                *existing = project.clone();
                Ok(())
            },
            None => Err(StorageError::not_found("project", &project.id)),
        }
    }

    async fn delete_project(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.inner.write().await.projects.remove(id).is_some())
    }

    async fn list_projects(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        let inner = self.inner.read().await;
        Ok(sorted_page(inner.projects.values().cloned(), offset, limit))
    }

    async fn count_projects(&self) -> Result<usize, StorageError> {
        Ok(self.inner.read().await.projects.len())
    }

    async fn find_projects_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        let inner = self.inner.read().await;
        let hits = inner.projects.values().filter(|p| matches_any(*p, tag_keys)).cloned();
        Ok(sorted_page(hits, 0, limit))
    }

    async fn find_projects_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError> {
        let inner = self.inner.read().await;
        let hits = inner.projects.values().filter(|p| has_all(*p, tag_keys)).cloned();
        Ok(sorted_page(hits, 0, limit))
    }
}

#[async_trait]
impl ScreenStore for MemoryStorage {
    async fn create_screen(&self, screen: &Screen) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.screens.contains_key(&screen.id) {
            return Err(StorageError::Duplicate(format!("screen {}", screen.id)));
        }
        inner.screens.insert(screen.id.clone(), screen.clone());
        Ok(())
    }

    async fn get_screen(&self, id: &str) -> Result<Option<Screen>, StorageError> {
        Ok(self.inner.read().await.screens.get(id).cloned())
    }

    async fn update_screen(&self, screen: &Screen) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        match inner.screens.get_mut(&screen.id) {
            Some(existing) => {
                *existing = screen.clone();
                Ok(())
            },
            None => Err(StorageError::not_found("screen", &screen.id)),
        }
    }

    async fn delete_screen(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.inner.write().await.screens.remove(id).is_some())
    }

    async fn list_screens(
        &self,
        project_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        let inner = self.inner.read().await;
        let hits = inner
            .screens
            .values()
            .filter(|s| project_id.is_none_or(|p| s.project_id.as_deref() == Some(p)))
            .cloned();
        Ok(sorted_page(hits, offset, limit))
    }

    async fn count_screens(&self, project_id: Option<&str>) -> Result<usize, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .screens
            .values()
            .filter(|s| project_id.is_none_or(|p| s.project_id.as_deref() == Some(p)))
            .count())
    }

    async fn find_screens_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        let inner = self.inner.read().await;
        let hits = inner.screens.values().filter(|s| matches_any(*s, tag_keys)).cloned();
        Ok(sorted_page(hits, 0, limit))
    }

    async fn find_screens_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError> {
        let inner = self.inner.read().await;
        let hits = inner.screens.values().filter(|s| has_all(*s, tag_keys)).cloned();
        Ok(sorted_page(hits, 0, limit))
    }
}

#[async_trait]
impl FavoriteStore for MemoryStorage {
    async fn add_favorite(&self, favorite: &Favorite) -> Result<Favorite, StorageError> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner
            .favorites
            .iter()
            .find(|f| f.same_slot(&favorite.user_id, favorite.target, &favorite.target_id))
        {
            return Ok(existing.clone());
        }
        inner.favorites.push(favorite.clone());
        Ok(favorite.clone())
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError> {
        let mut inner = self.inner.write().await;
        let before = inner.favorites.len();
        inner.favorites.retain(|f| !f.same_slot(user_id, target, target_id));
        Ok(inner.favorites.len() != before)
    }

    async fn list_favorites(
        &self,
        user_id: &str,
        target: Option<FavoriteTarget>,
    ) -> Result<Vec<Favorite>, StorageError> {
        let inner = self.inner.read().await;
        let mut favorites: Vec<Favorite> = inner
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id && target.is_none_or(|t| f.target == t))
            .cloned()
            .collect();
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(favorites)
    }

    async fn is_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.favorites.iter().any(|f| f.same_slot(user_id, target, target_id)))
    }
}

fn clear_other_defaults(configs: &mut HashMap<String, ModelConfig>, keep: &ModelConfig) {
    if !keep.is_default {
        return;
    }
    for other in configs.values_mut() {
        if other.purpose == keep.purpose && other.id != keep.id {
            other.is_default = false;
        }
    }
}

#[async_trait]
impl ModelConfigStore for MemoryStorage {
    async fn create_model_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.model_configs.contains_key(&config.id) {
            return Err(StorageError::Duplicate(format!("model config {}", config.id)));
        }
        clear_other_defaults(&mut inner.model_configs, config);
        inner.model_configs.insert(config.id.clone(), config.clone());
        Ok(())
    }

    async fn get_model_config(&self, id: &str) -> Result<Option<ModelConfig>, StorageError> {
        Ok(self.inner.read().await.model_configs.get(id).cloned())
    }

    async fn update_model_config(&self, config: &ModelConfig) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if !inner.model_configs.contains_key(&config.id) {
            return Err(StorageError::not_found("model config", &config.id));
        }
        clear_other_defaults(&mut inner.model_configs, config);
        inner.model_configs.insert(config.id.clone(), config.clone());
        Ok(())
    }

    async fn delete_model_config(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.inner.write().await.model_configs.remove(id).is_some())
    }

    async fn list_model_configs(
        &self,
        purpose: Option<ModelPurpose>,
    ) -> Result<Vec<ModelConfig>, StorageError> {
        let inner = self.inner.read().await;
        let mut configs: Vec<ModelConfig> = inner
            .model_configs
            .values()
            .filter(|c| purpose.is_none_or(|p| c.purpose == p))
            .cloned()
            .collect();
        configs.sort_by(|a, b| {
            a.purpose.as_str().cmp(b.purpose.as_str()).then_with(|| a.name.cmp(&b.name))
        });
        Ok(configs)
    }

    async fn get_default_model_config(
        &self,
        purpose: ModelPurpose,
    ) -> Result<Option<ModelConfig>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.model_configs.values().find(|c| c.purpose == purpose && c.is_default).cloned())
    }
}
