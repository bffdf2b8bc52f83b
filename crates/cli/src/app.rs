use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use inspira_core::{EnvSettings, TaxonomySet};
use inspira_service::{
    AiSearchService, ChatService, FavoriteService, ModelConfigService, ProjectService,
    ScreenService,
};
use inspira_storage::StorageBackend;

/// Services wired over one storage backend.
pub(crate) struct App {
    pub projects: Arc<ProjectService>,
    pub screens: Arc<ScreenService>,
    pub favorites: FavoriteService,
    pub models: Arc<ModelConfigService>,
    pub ai_search: AiSearchService,
    pub chat: ChatService,
}

/// `--taxonomy` wins over `INSPIRA_TAXONOMY_PATH`.
pub(crate) fn taxonomy_path(flag: Option<&Path>, settings: &EnvSettings) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| settings.taxonomy_path.as_ref().map(PathBuf::from))
}

impl App {
    pub(crate) async fn build(database_url: Option<String>, taxonomy: Option<&Path>) -> Result<Self> {
        let settings = EnvSettings::from_env();

        let storage = match database_url.or_else(|| settings.database_url.clone()) {
            Some(url) => StorageBackend::new_postgres(&url, settings.pg_max_connections)
                .await
                .context("failed to connect to PostgreSQL")?,
            None => {
                tracing::warn!(
                    "no database URL configured, using in-memory storage; records are lost on exit"
                );
                StorageBackend::new_memory()
            },
        };
        tracing::debug!(backend = storage.kind(), "storage ready");
        let storage = Arc::new(storage);

        let taxonomies = TaxonomySet::load_or_builtin(taxonomy_path(taxonomy, &settings).as_deref())
            .context("failed to load taxonomy")?;

        let projects = Arc::new(ProjectService::new(Arc::clone(&storage)));
        let screens = Arc::new(ScreenService::new(Arc::clone(&storage)));
        let models = Arc::new(ModelConfigService::new(Arc::clone(&storage), settings));
        let ai_search = AiSearchService::new(
            Arc::clone(&screens),
            Arc::clone(&projects),
            Arc::clone(&models),
            Arc::new(taxonomies),
        );

        Ok(Self {
            favorites: FavoriteService::new(storage),
            chat: ChatService::new(Arc::clone(&models)),
            projects,
            screens,
            models,
            ai_search,
        })
    }
}
