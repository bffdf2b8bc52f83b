use async_trait::async_trait;
use inspira_core::Project;

use crate::error::StorageError;

/// Project persistence.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert a new project. Fails with `Duplicate` if the id exists.
    async fn create_project(&self, project: &Project) -> Result<(), StorageError>;

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError>;

    /// Overwrite an existing project. Fails with `NotFound` if missing.
    async fn update_project(&self, project: &Project) -> Result<(), StorageError>;

    /// Returns `true` if a row was deleted.
    async fn delete_project(&self, id: &str) -> Result<bool, StorageError>;

    /// Most recently updated first.
    async fn list_projects(&self, offset: usize, limit: usize)
    -> Result<Vec<Project>, StorageError>;

    async fn count_projects(&self) -> Result<usize, StorageError>;

    /// OR-prefetch: projects with at least one tag equal to, containing, or
    /// contained in one of `tag_keys` (already lowercased).
    async fn find_projects_matching_any_tag(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError>;

    /// Projects carrying every one of `tag_keys` exactly.
    async fn find_projects_with_all_tags(
        &self,
        tag_keys: &[String],
        limit: usize,
    ) -> Result<Vec<Project>, StorageError>;
}
