use std::sync::Arc;

use inspira_core::{Favorite, FavoriteTarget, Project, Screen};
use inspira_storage::StorageBackend;
use inspira_storage::traits::{FavoriteStore, ProjectStore, ScreenStore};
use serde::Serialize;

use crate::ServiceError;
use crate::validation::required;

/// A favorite together with the record it points at.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FavoriteItem {
    Project { favorite: Favorite, project: Project },
    Screen { favorite: Favorite, screen: Screen },
}

pub struct FavoriteService {
    storage: Arc<StorageBackend>,
}

impl FavoriteService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    async fn target_exists(&self, target: FavoriteTarget, id: &str) -> Result<bool, ServiceError> {
        Ok(match target {
            FavoriteTarget::Project => self.storage.get_project(id).await?.is_some(),
            FavoriteTarget::Screen => self.storage.get_screen(id).await?.is_some(),
        })
    }

    /// Favorite a project or screen. Adding the same target twice returns
    /// the existing favorite.
    pub async fn add(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<Favorite, ServiceError> {
        let user_id = required("user_id", user_id)?;
        let target_id = required("target_id", target_id)?;
        if !self.target_exists(target, &target_id).await? {
            return Err(ServiceError::not_found(target.as_str(), &target_id));
        }
        let favorite = self.storage.add_favorite(&Favorite::new(user_id, target, target_id)).await?;
        tracing::info!(user_id = %favorite.user_id, target = target.as_str(), target_id = %favorite.target_id, "favorite added");
        Ok(favorite)
    }

    pub async fn remove(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, ServiceError> {
        Ok(self.storage.remove_favorite(user_id, target, target_id).await?)
    }

    /// Favorites resolved into their records. Favorites whose record was
    /// deleted are skipped.
    pub async fn list(
        &self,
        user_id: &str,
        target: Option<FavoriteTarget>,
    ) -> Result<Vec<FavoriteItem>, ServiceError> {
        let favorites = self.storage.list_favorites(user_id, target).await?;
        let mut items = Vec::with_capacity(favorites.len());
        let mut dangling = 0_usize;
        for favorite in favorites {
            let item = match favorite.target {
                FavoriteTarget::Project => self
                    .storage
                    .get_project(&favorite.target_id)
                    .await?
                    .map(|project| FavoriteItem::Project { favorite, project }),
                FavoriteTarget::Screen => self
                    .storage
                    .get_screen(&favorite.target_id)
                    .await?
                    .map(|screen| FavoriteItem::Screen { favorite, screen }),
            };
            match item {
                Some(item) => items.push(item),
                None => dangling += 1,
            }
        }
        if dangling > 0 {
            tracing::debug!(user_id, dangling, "skipped favorites of deleted records");
        }
        Ok(items)
    }
}
