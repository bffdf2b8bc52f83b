use async_trait::async_trait;
use inspira_core::{Favorite, FavoriteTarget};

use crate::error::StorageError;

/// Per-user bookmarks.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Idempotent: if the slot is already taken, the existing favorite is returned.
    async fn add_favorite(&self, favorite: &Favorite) -> Result<Favorite, StorageError>;

    /// Returns `true` if a favorite was removed.
    async fn remove_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError>;

    /// Newest first.
    async fn list_favorites(
        &self,
        user_id: &str,
        target: Option<FavoriteTarget>,
    ) -> Result<Vec<Favorite>, StorageError>;

    async fn is_favorite(
        &self,
        user_id: &str,
        target: FavoriteTarget,
        target_id: &str,
    ) -> Result<bool, StorageError>;
}
