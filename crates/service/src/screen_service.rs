use std::sync::Arc;

use inspira_core::{
    FUZZY_PREFETCH_LIMIT, ScoredMatch, Screen, ScreenInput, ScreenPatch, SearchMode, SearchPage,
    TagQuery, tag_key,
};
use inspira_search::{SearchError, normalize_tags, run_tag_search};
use inspira_storage::StorageBackend;
use inspira_storage::traits::{ProjectStore, ScreenStore};

use crate::ServiceError;
use crate::validation::{PageWindow, clean_tags, optional, required};

pub struct ScreenService {
    storage: Arc<StorageBackend>,
}

fn query_keys(query: &TagQuery) -> Result<Vec<String>, ServiceError> {
    let keys: Vec<String> = normalize_tags(&query.tags).iter().map(|t| tag_key(t)).collect();
    if keys.is_empty() {
        return Err(SearchError::EmptyQuery.into());
    }
    Ok(keys)
}

impl ScreenService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    async fn ensure_project(&self, project_id: Option<&str>) -> Result<(), ServiceError> {
        if let Some(project_id) = project_id {
            if self.storage.get_project(project_id).await?.is_none() {
                return Err(ServiceError::not_found("project", project_id));
            }
        }
        Ok(())
    }

    pub async fn create(&self, input: ScreenInput) -> Result<Screen, ServiceError> {
        let input = ScreenInput {
            project_id: optional(input.project_id),
            name: required("name", &input.name)?,
            image_url: required("image_url", &input.image_url)?,
            description: optional(input.description),
            tags: clean_tags(input.tags),
        };
        self.ensure_project(input.project_id.as_deref()).await?;
        let screen = Screen::from_input(input);
        self.storage.create_screen(&screen).await?;
        tracing::info!(id = %screen.id, project_id = ?screen.project_id, tags = screen.tags.len(), "screen created");
        Ok(screen)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Screen>, ServiceError> {
        Ok(self.storage.get_screen(id).await?)
    }

    pub async fn list(
        &self,
        project_id: Option<&str>,
        page: usize,
        page_size: usize,
    ) -> Result<SearchPage<Screen>, ServiceError> {
        let window = PageWindow::new(page, page_size);
        let items = self.storage.list_screens(project_id, window.offset, window.page_size).await?;
        let total = self.storage.count_screens(project_id).await?;
        Ok(SearchPage { items, total, page: window.page, page_size: window.page_size })
    }

    pub async fn update(&self, id: &str, patch: ScreenPatch) -> Result<Screen, ServiceError> {
        let mut screen =
            self.storage.get_screen(id).await?.ok_or_else(|| ServiceError::not_found("screen", id))?;
        // blank project_id / description clear the field in `Screen::apply`
        let patch = ScreenPatch {
            name: patch.name.as_deref().map(|n| required("name", n)).transpose()?,
            image_url: patch.image_url.as_deref().map(|u| required("image_url", u)).transpose()?,
            tags: patch.tags.map(clean_tags),
            ..patch
        };
        self.ensure_project(patch.project_id.as_deref().map(str::trim).filter(|p| !p.is_empty()))
            .await?;
        screen.apply(patch);
        self.storage.update_screen(&screen).await?;
        tracing::info!(id = %screen.id, "screen updated");
        Ok(screen)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.storage.delete_screen(id).await?;
        if deleted {
            tracing::info!(id, "screen deleted");
        }
        Ok(deleted)
    }

    /// Screens carrying every query tag (exact, case-insensitive).
    pub async fn precise_search(
        &self,
        query: &TagQuery,
    ) -> Result<SearchPage<ScoredMatch<Screen>>, ServiceError> {
        let keys = query_keys(query)?;
        let candidates = self.storage.find_screens_with_all_tags(&keys, FUZZY_PREFETCH_LIMIT).await?;
        let query = TagQuery { mode: SearchMode::Precise, ..query.clone() };
        Ok(run_tag_search(&query, candidates)?)
    }

    /// Screens ranked by the share of query tags they match, partial
    /// matches earning half credit.
    pub async fn fuzzy_search(
        &self,
        query: &TagQuery,
    ) -> Result<SearchPage<ScoredMatch<Screen>>, ServiceError> {
        let keys = query_keys(query)?;
        let candidates =
            self.storage.find_screens_matching_any_tag(&keys, FUZZY_PREFETCH_LIMIT).await?;
        if candidates.len() == FUZZY_PREFETCH_LIMIT {
            tracing::warn!(limit = FUZZY_PREFETCH_LIMIT, "fuzzy prefetch hit its limit, results may be incomplete");
        }
        let query = TagQuery { mode: SearchMode::Fuzzy, ..query.clone() };
        Ok(run_tag_search(&query, candidates)?)
    }

    pub async fn search(
        &self,
        query: &TagQuery,
    ) -> Result<SearchPage<ScoredMatch<Screen>>, ServiceError> {
        match query.mode {
            SearchMode::Precise => self.precise_search(query).await,
            SearchMode::Fuzzy => self.fuzzy_search(query).await,
        }
    }
}
