//! Two-level tag taxonomy (category → allowed tags).
//!
//! The tagging pipeline may only ever emit categories and tags found here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::search::tag_key;

const DEFAULT_TAXONOMY_JSON: &str = include_str!("../assets/default_taxonomy.json");

/// First-level category with its allowed second-level tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagCategory {
    pub name: String,
    pub tags: Vec<String>,
}

impl TagCategory {
    /// Canonical spelling of `tag` inside this category, case-insensitive.
    #[must_use]
    pub fn canonical_tag(&self, tag: &str) -> Option<&str> {
        let wanted = tag_key(tag);
        self.tags.iter().find(|t| tag_key(t) == wanted).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Taxonomy {
    pub categories: Vec<TagCategory>,
}

impl Taxonomy {
    #[must_use]
    pub fn new(categories: Vec<TagCategory>) -> Self {
        Self { categories }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn find_category(&self, name: &str) -> Option<&TagCategory> {
        let wanted = tag_key(name);
        self.categories.iter().find(|c| tag_key(&c.name) == wanted)
    }

    /// Canonical tag looked up in the given category.
    #[must_use]
    pub fn canonical_tag(&self, category: &str, tag: &str) -> Option<&str> {
        self.find_category(category).and_then(|c| c.canonical_tag(tag))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<String> = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            let key = tag_key(&category.name);
            if key.is_empty() {
                return Err(CoreError::Taxonomy("category with empty name".to_owned()));
            }
            if seen.contains(&key) {
                return Err(CoreError::Taxonomy(format!("duplicate category '{}'", category.name)));
            }
            if category.tags.iter().any(|t| t.trim().is_empty()) {
                return Err(CoreError::Taxonomy(format!(
                    "category '{}' contains an empty tag",
                    category.name
                )));
            }
            seen.push(key);
        }
        Ok(())
    }
}

/// Taxonomies for every searchable record kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxonomySet {
    pub screen: Taxonomy,
    pub project: Taxonomy,
}

impl TaxonomySet {
    /// The taxonomy compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_TAXONOMY_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(json)?;
        set.screen.validate()?;
        set.project.validate()?;
        Ok(set)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let set = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            screen_categories = set.screen.categories.len(),
            project_categories = set.project.categories.len(),
            "taxonomy loaded"
        );
        Ok(set)
    }

    /// Load from `path` when given, otherwise use the built-in taxonomy.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn builtin_taxonomy_is_valid() {
        let set = TaxonomySet::builtin().unwrap();
        assert!(!set.screen.is_empty());
        assert!(!set.project.is_empty());
        assert!(set.screen.find_category("Component").is_some());
    }

    #[test]
    fn canonical_tag_lookup_is_case_insensitive() {
        let set = TaxonomySet::builtin().unwrap();
        assert_eq!(set.screen.canonical_tag("PAGE TYPE", " Login "), Some("login"));
        assert_eq!(set.screen.canonical_tag("page type", "spaceship"), None);
        assert_eq!(set.screen.canonical_tag("no such category", "login"), None);
    }

    #[test]
    fn duplicate_categories_rejected() {
        let json = r#"{"screen": [{"name": "a", "tags": []}, {"name": "A", "tags": []}], "project": []}"#;
        let err = TaxonomySet::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn empty_tag_rejected() {
        let json = r#"{"screen": [{"name": "a", "tags": [" "]}], "project": []}"#;
        assert!(TaxonomySet::from_json(json).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"screen": [{{"name": "mood", "tags": ["calm"]}}], "project": []}}"#
        )
        .unwrap();
        let set = TaxonomySet::load_or_builtin(Some(file.path())).unwrap();
        assert_eq!(set.screen.category_names().collect::<Vec<_>>(), vec!["mood"]);
        assert!(set.project.is_empty());
    }
}
