use std::sync::Arc;

use inspira_core::{
    FUZZY_PREFETCH_LIMIT, Project, ProjectInput, ProjectPatch, ScoredMatch, SearchMode, SearchPage,
    TagQuery, tag_key,
};
use inspira_search::{normalize_tags, run_tag_search};
use inspira_storage::StorageBackend;
use inspira_storage::traits::ProjectStore;

use crate::ServiceError;
use crate::validation::{PageWindow, clean_tags, optional, required};

pub struct ProjectService {
    storage: Arc<StorageBackend>,
}

impl ProjectService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, input: ProjectInput) -> Result<Project, ServiceError> {
        let input = ProjectInput {
            name: required("name", &input.name)?,
            description: optional(input.description),
            platform: input.platform,
            tags: clean_tags(input.tags),
            cover_url: optional(input.cover_url),
        };
        let project = Project::from_input(input);
        self.storage.create_project(&project).await?;
        tracing::info!(id = %project.id, tags = project.tags.len(), "project created");
        Ok(project)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Project>, ServiceError> {
        Ok(self.storage.get_project(id).await?)
    }

    pub async fn list(&self, page: usize, page_size: usize) -> Result<SearchPage<Project>, ServiceError> {
        let window = PageWindow::new(page, page_size);
        let items = self.storage.list_projects(window.offset, window.page_size).await?;
        let total = self.storage.count_projects().await?;
        Ok(SearchPage { items, total, page: window.page, page_size: window.page_size })
    }

    pub async fn update(&self, id: &str, patch: ProjectPatch) -> Result<Project, ServiceError> {
        let mut project =
            self.storage.get_project(id).await?.ok_or_else(|| ServiceError::not_found("project", id))?;
        // blank description / cover_url clear the field in `Project::apply`
        let patch = ProjectPatch {
            name: patch.name.as_deref().map(|n| required("name", n)).transpose()?,
            tags: patch.tags.map(clean_tags),
            ..patch
        };
        project.apply(patch);
        self.storage.update_project(&project).await?;
        tracing::info!(id = %project.id, "project updated");
        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.storage.delete_project(id).await?;
        if deleted {
            tracing::info!(id, "project deleted");
        }
        Ok(deleted)
    }

    /// Tag search over projects.
    ///
    /// Precise queries prefetch rows carrying every tag; fuzzy queries
    /// prefetch rows sharing at least one (possibly partial) tag.
    pub async fn search(
        &self,
        query: &TagQuery,
    ) -> Result<SearchPage<ScoredMatch<Project>>, ServiceError> {
        let keys: Vec<String> = normalize_tags(&query.tags).iter().map(|t| tag_key(t)).collect();
        if keys.is_empty() {
            return Err(inspira_search::SearchError::EmptyQuery.into());
        }
        let candidates = match query.mode {
            SearchMode::Precise => {
                self.storage.find_projects_with_all_tags(&keys, FUZZY_PREFETCH_LIMIT).await?
            },
            SearchMode::Fuzzy => {
                self.storage.find_projects_matching_any_tag(&keys, FUZZY_PREFETCH_LIMIT).await?
            },
        };
        Ok(run_tag_search(query, candidates)?)
    }
}
