//! Free-text search: the tagging model turns a requirement into a
//! [`TagQuery`], which then runs as an ordinary tag search.

use std::sync::Arc;

use inspira_core::{
    ModelPurpose, Project, ScoredMatch, Screen, SearchPage, TagQuery, Taxonomy, TaxonomySet,
};
use inspira_llm::{Intent, Resolution, TagResolver};
use serde::Serialize;

use crate::ServiceError;
use crate::model_config_service::ModelConfigService;
use crate::project_service::ProjectService;
use crate::screen_service::ScreenService;

/// Everything the pipeline learned, whether or not it ended in a search.
#[derive(Debug, Clone, Serialize)]
pub struct AiSearchOutcome<T> {
    pub intent: Intent,
    pub query: Option<TagQuery>,
    pub page: Option<SearchPage<ScoredMatch<T>>>,
}

pub struct AiSearchService {
    screens: Arc<ScreenService>,
    projects: Arc<ProjectService>,
    models: Arc<ModelConfigService>,
    taxonomies: Arc<TaxonomySet>,
}

impl AiSearchService {
    #[must_use]
    pub fn new(
        screens: Arc<ScreenService>,
        projects: Arc<ProjectService>,
        models: Arc<ModelConfigService>,
        taxonomies: Arc<TaxonomySet>,
    ) -> Self {
        Self { screens, projects, models, taxonomies }
    }

    async fn resolve(
        &self,
        taxonomy: &Taxonomy,
        requirement: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Resolution, ServiceError> {
        if requirement.trim().is_empty() {
            return Err(ServiceError::InvalidInput("requirement must not be empty".to_owned()));
        }
        let client = self.models.resolve_client(ModelPurpose::Tagging).await?;
        let resolution =
            TagResolver::new(&client, taxonomy).resolve_with_intent(requirement, page, page_size).await?;
        tracing::info!(
            is_search = resolution.intent.is_search,
            strict = resolution.intent.strict,
            tags = resolution.query.as_ref().map_or(0, |q| q.tags.len()),
            "requirement resolved"
        );
        Ok(resolution)
    }

    pub async fn search_screens(
        &self,
        requirement: &str,
        page: usize,
        page_size: usize,
    ) -> Result<AiSearchOutcome<Screen>, ServiceError> {
        let Resolution { intent, query } =
            self.resolve(&self.taxonomies.screen, requirement, page, page_size).await?;
        let page = match &query {
            Some(q) => Some(self.screens.search(q).await?),
            None => None,
        };
        if let Some(p) = &page {
            tracing::info!(total = p.total, returned = p.items.len(), "AI screen search done");
        }
        Ok(AiSearchOutcome { intent, query, page })
    }

    pub async fn search_projects(
        &self,
        requirement: &str,
        page: usize,
        page_size: usize,
    ) -> Result<AiSearchOutcome<Project>, ServiceError> {
        let Resolution { intent, query } =
            self.resolve(&self.taxonomies.project, requirement, page, page_size).await?;
        let page = match &query {
            Some(q) => Some(self.projects.search(q).await?),
            None => None,
        };
        if let Some(p) = &page {
            tracing::info!(total = p.total, returned = p.items.len(), "AI project search done");
        }
        Ok(AiSearchOutcome { intent, query, page })
    }
}
