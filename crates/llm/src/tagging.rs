//! Two-stage tag resolution: requirement text → intent → categories → tags → query.
//!
//! Every category and tag the model proposes is mapped back onto the
//! taxonomy; anything it invents is dropped.

use std::collections::HashSet;

use futures_util::future::try_join_all;
use inspira_core::{
    MAX_FIRST_LEVEL_CATEGORIES, MAX_TAGS_PER_CATEGORY, SearchMode, TagCategory, TagQuery,
    Taxonomy, tag_key,
};
use serde::{Deserialize, Serialize};

use crate::client::{GeminiClient, truncate};
use crate::error::LlmError;

/// Longest requirement text forwarded to the model.
pub const MAX_REQUIREMENT_LEN: usize = 2000;

/// What the user is asking for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intent {
    /// The request is a search over the library.
    #[serde(default)]
    pub is_search: bool,
    /// Every described attribute must be present.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub summary: String,
}

/// Intent plus the query built from it, if any.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resolution {
    pub intent: Intent,
    pub query: Option<TagQuery>,
}

#[derive(Deserialize)]
struct CategoriesJson {
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Deserialize)]
struct TagsJson {
    #[serde(default)]
    tags: Vec<String>,
}

fn validate_requirement(requirement: &str) -> Result<&str, LlmError> {
    let trimmed = requirement.trim();
    if trimmed.is_empty() {
        return Err(LlmError::InvalidInput("requirement is empty".to_owned()));
    }
    Ok(truncate(trimmed, MAX_REQUIREMENT_LEN))
}

fn quoted_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.map(|i| format!("\"{i}\"")).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, Copy)]
pub struct TagResolver<'a> {
    client: &'a GeminiClient,
    taxonomy: &'a Taxonomy,
}

impl<'a> TagResolver<'a> {
    #[must_use]
    pub const fn new(client: &'a GeminiClient, taxonomy: &'a Taxonomy) -> Self {
        Self { client, taxonomy }
    }

    /// # Errors
    /// `InvalidInput` for a blank requirement (no request is sent), otherwise
    /// any error from [`GeminiClient::complete_json`].
    pub async fn detect_intent(&self, requirement: &str) -> Result<Intent, LlmError> {
        let requirement = validate_requirement(requirement)?;
        let prompt = format!(
            r#"You classify requests sent to a library of UI design screens and projects.

Request: {requirement}

Decide:
- is_search: true if the user wants to find existing screens or projects in the library
- strict: true if every attribute they describe must be present (words like "only", "exactly", "must have")
- summary: one short sentence restating what they are looking for

Return JSON: {{"is_search": true|false, "strict": true|false, "summary": "..."}}"#
        );
        let intent: Intent = self.client.complete_json(&prompt).await?;
        tracing::debug!(is_search = intent.is_search, strict = intent.strict, "intent detected");
        Ok(intent)
    }

    /// First-level categories relevant to `requirement`, canonical and capped.
    ///
    /// # Errors
    /// Same as [`TagResolver::detect_intent`].
    pub async fn select_first_level(&self, requirement: &str) -> Result<Vec<String>, LlmError> {
        let requirement = validate_requirement(requirement)?;
        if self.taxonomy.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = format!(
            r#"Pick the tag categories that describe this request to a UI design library.

Request: {requirement}

Allowed categories: [{categories}]

Choose at most {max} categories, only from the allowed list, most relevant first.

Return JSON: {{"categories": ["..."]}}"#,
            categories = quoted_list(self.taxonomy.category_names()),
            max = MAX_FIRST_LEVEL_CATEGORIES,
        );
        let reply: CategoriesJson = self.client.complete_json(&prompt).await?;

        let mut seen = HashSet::new();
        let selected: Vec<String> = reply
            .categories
            .iter()
            .filter_map(|c| self.taxonomy.find_category(c))
            .filter(|c| seen.insert(tag_key(&c.name)))
            .take(MAX_FIRST_LEVEL_CATEGORIES)
            .map(|c| c.name.clone())
            .collect();
        tracing::debug!(
            proposed = reply.categories.len(),
            kept = selected.len(),
            "first-level categories selected"
        );
        Ok(selected)
    }

    /// Second-level tags for each category, one concurrent request per category.
    ///
    /// Results are merged in category order and deduplicated.
    ///
    /// # Errors
    /// Same as [`TagResolver::detect_intent`]; the first failing category
    /// fails the whole call.
    pub async fn select_second_level(
        &self,
        requirement: &str,
        categories: &[String],
    ) -> Result<Vec<String>, LlmError> {
        let requirement = validate_requirement(requirement)?;
        let mut seen_categories = HashSet::new();
        let known: Vec<&TagCategory> = categories
            .iter()
            .filter_map(|c| self.taxonomy.find_category(c))
            .filter(|c| seen_categories.insert(tag_key(&c.name)))
            .collect();
        if known.is_empty() {
            return Ok(Vec::new());
        }

        let per_category =
            try_join_all(known.into_iter().map(|c| self.select_tags_in(requirement, c))).await?;

        let mut seen = HashSet::new();
        Ok(per_category.into_iter().flatten().filter(|t| seen.insert(tag_key(t))).collect())
    }

    async fn select_tags_in(
        &self,
        requirement: &str,
        category: &TagCategory,
    ) -> Result<Vec<String>, LlmError> {
        let prompt = format!(
            r#"Pick the tags that match this request to a UI design library.

Category: {name}
Request: {requirement}

Allowed tags: [{tags}]

Choose at most {max} tags, only from the allowed list. Return an empty list if none fit.

Return JSON: {{"tags": ["..."]}}"#,
            name = category.name,
            tags = quoted_list(category.tags.iter().map(String::as_str)),
            max = MAX_TAGS_PER_CATEGORY,
        );
        let reply: TagsJson = self.client.complete_json(&prompt).await?;

        let mut seen = HashSet::new();
        let tags: Vec<String> = reply
            .tags
            .iter()
            .filter_map(|t| category.canonical_tag(t))
            .filter(|t| seen.insert(tag_key(t)))
            .take(MAX_TAGS_PER_CATEGORY)
            .map(str::to_owned)
            .collect();
        tracing::debug!(
            category = %category.name,
            proposed = reply.tags.len(),
            kept = tags.len(),
            "second-level tags selected"
        );
        Ok(tags)
    }

    /// Run the whole pipeline and keep the detected intent.
    ///
    /// Stops early (query `None`) when the request is not a search, or when
    /// no category or tag survives sanitization.
    ///
    /// # Errors
    /// Same as [`TagResolver::detect_intent`].
    pub async fn resolve_with_intent(
        &self,
        requirement: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Resolution, LlmError> {
        let intent = self.detect_intent(requirement).await?;
        if !intent.is_search {
            tracing::info!(summary = %intent.summary, "request is not a search");
            return Ok(Resolution { intent, query: None });
        }

        let categories = self.select_first_level(requirement).await?;
        if categories.is_empty() {
            tracing::info!("no taxonomy category matched the request");
            return Ok(Resolution { intent, query: None });
        }

        let tags = self.select_second_level(requirement, &categories).await?;
        if tags.is_empty() {
            tracing::info!(?categories, "no taxonomy tag matched the request");
            return Ok(Resolution { intent, query: None });
        }

        let mode = if intent.strict { SearchMode::Precise } else { SearchMode::Fuzzy };
        tracing::info!(mode = mode.as_str(), ?categories, ?tags, "tag query resolved");
        let query = TagQuery::new(tags, mode).with_page(page, page_size);
        Ok(Resolution { intent, query: Some(query) })
    }

    /// Like [`TagResolver::resolve_with_intent`], returning only the query.
    ///
    /// # Errors
    /// Same as [`TagResolver::detect_intent`].
    pub async fn resolve(
        &self,
        requirement: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Option<TagQuery>, LlmError> {
        Ok(self.resolve_with_intent(requirement, page, page_size).await?.query)
    }
}
