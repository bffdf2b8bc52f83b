use async_trait::async_trait;
use inspira_core::Screen;

use crate::error::StorageError;

/// Screen persistence.
#[async_trait]
pub trait ScreenStore: Send + Sync {
    async fn create_screen(&self, screen: &Screen) -> Result<(), StorageError>;

    async fn get_screen(&self, id: &str) -> Result<Option<Screen>, StorageError>;

    /// Fails with `NotFound` if missing.
    async fn update_screen(&self, screen: &Screen) -> Result<(), StorageError>;

    async fn delete_screen(&self, id: &str) -> Result<bool, StorageError>;

    /// Most recently updated first, optionally restricted to one project.
    async fn list_screens(
        &self,
        project_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError>;

    async fn count_screens(&self, project_id: Option<&str>) -> Result<usize, StorageError>;

    /// OR-prefetch for fuzzy search (exact or partial overlap on any tag).
    async fn find_screens_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError>;

    /// AND-prefetch for precise search.
    async fn find_screens_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Screen>, StorageError>;
}
