//! Search request/response types shared by storage, scoring and services.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::CoreError;

/// Comparison key for a tag: trimmed and lowercased.
#[must_use]
pub fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Shorter side of a partial tag match must have at least this many chars.
pub const MIN_PARTIAL_LEN: usize = 2;

/// Whether two tag keys overlap as substrings (either direction).
///
/// Both arguments must already be keys (see [`tag_key`]). Equal keys are
/// not considered partial.
#[must_use]
pub fn is_partial_match(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    let (shorter, longer) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    shorter.chars().count() >= MIN_PARTIAL_LEN && longer.contains(shorter)
}

/// Anything that carries tags and can be ranked by the tag search.
pub trait Taggable {
    fn id(&self) -> &str;
    fn tags(&self) -> &[String];
    fn updated_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Every query tag must be present on the record.
    Precise,
    /// Records are ranked by the share of query tags they match.
    #[default]
    Fuzzy,
}

impl SearchMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Precise => "precise",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl FromStr for SearchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "precise" | "exact" => Ok(Self::Precise),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(CoreError::InvalidInput(format!(
                "unknown search mode '{other}', expected precise|fuzzy"
            ))),
        }
    }
}

const fn default_page() -> usize {
    1
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// A tag search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagQuery {
    pub tags: Vec<String>,
    #[serde(default)]
    pub mode: SearchMode,
    /// Fuzzy results below this percentage are dropped.
    #[serde(default)]
    pub min_percentage: u8,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl TagQuery {
    #[must_use]
    pub fn new(tags: Vec<String>, mode: SearchMode) -> Self {
        Self {
            tags,
            mode,
            min_percentage: 0,
            page: default_page(),
            page_size: default_page_size(),
        }
    }

    #[must_use]
    pub const fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn with_min_percentage(mut self, min_percentage: u8) -> Self {
        self.min_percentage = min_percentage;
        self
    }

    /// 1-based page, with 0 treated as 1.
    #[must_use]
    pub fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size clamped to `[1, MAX_PAGE_SIZE]`.
    #[must_use]
    pub fn capped_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// One search hit with its match details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredMatch<T> {
    pub item: T,
    pub matched_tags: Vec<String>,
    /// Always within `[0, 100]`.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> SearchPage<T> {
    #[must_use]
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self { items: Vec::new(), total: 0, page, page_size }
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 { 0 } else { self.total.div_ceil(self.page_size) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_key_normalizes_unicode_case() {
        assert_eq!(tag_key("  Dark Mode "), "dark mode");
        assert_eq!(tag_key("ÉCOLE"), "école");
    }

    #[test]
    fn partial_match_is_symmetric_and_length_bounded() {
        assert!(is_partial_match("button", "primary button"));
        assert!(is_partial_match("primary button", "button"));
        assert!(!is_partial_match("button", "button"));
        assert!(!is_partial_match("a", "card"));
        assert!(!is_partial_match("card", "modal"));
    }

    #[test]
    fn query_defaults_from_json() {
        let query: TagQuery = serde_json::from_str(r#"{"tags": ["login"]}"#).unwrap();
        assert_eq!(query.mode, SearchMode::Fuzzy);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(query.min_percentage, 0);
    }

    #[test]
    fn page_bounds_are_clamped() {
        let query = TagQuery::new(vec![], SearchMode::Precise).with_page(0, 10_000);
        assert_eq!(query.effective_page(), 1);
        assert_eq!(query.capped_page_size(), MAX_PAGE_SIZE);
        let query = query.with_page(3, 0);
        assert_eq!(query.capped_page_size(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: SearchPage<()> = SearchPage { items: vec![], total: 41, page: 1, page_size: 20 };
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn mode_accepts_exact_alias() {
        assert_eq!("exact".parse::<SearchMode>().unwrap(), SearchMode::Precise);
    }
}
