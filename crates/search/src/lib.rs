//! Tag search over in-memory candidates.
//!
//! Two modes:
//! 1. precise: every query tag must appear on the record (exact, case-insensitive)
//! 2. fuzzy: records are ranked by the share of query tags they match, with
//!    half credit for a partial (substring) match
//!
//! Candidates are prefetched by storage; this crate only scores, orders and pages them.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod scoring;

use inspira_core::{ScoredMatch, SearchMode, SearchPage, TagQuery, Taggable};
use thiserror::Error;

pub use inspira_core::MIN_PARTIAL_LEN;
pub use scoring::{
    EXACT_CREDIT, PARTIAL_CREDIT, fuzzy_search, normalize_tags, paginate,
    precise_search, score, tag_credit,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("query has no usable tags")]
    EmptyQuery,
}

/// Score `candidates` against `query` and return the requested page.
///
/// `candidates` may contain records that do not match at all; they are
/// filtered out here, so an over-broad prefetch is harmless.
pub fn run_tag_search<T: Taggable>(
    query: &TagQuery,
    candidates: Vec<T>,
) -> Result<SearchPage<ScoredMatch<T>>, SearchError> {
    let tags = normalize_tags(&query.tags);
    if tags.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let candidate_count = candidates.len();
    let matches = match query.mode {
        SearchMode::Precise => precise_search(&tags, candidates),
        SearchMode::Fuzzy => fuzzy_search(&tags, query.min_percentage, candidates),
    };
    tracing::debug!(
        mode = query.mode.as_str(),
        tags = tags.len(),
        candidates = candidate_count,
        matched = matches.len(),
        "tag search scored"
    );

    Ok(paginate(matches, query.effective_page(), query.capped_page_size()))
}
