use std::cmp::Ordering;
use std::collections::HashSet;

use inspira_core::{
    MAX_PAGE_SIZE, MAX_QUERY_TAGS, ScoredMatch, SearchPage, Taggable, is_partial_match, tag_key,
};

/// Credit for an exact (case-insensitive) tag match.
pub const EXACT_CREDIT: f64 = 1.0;
/// Credit when one tag contains the other.
pub const PARTIAL_CREDIT: f64 = 0.5;

/// Trim, drop blanks, dedup case-insensitively (first spelling wins), cap length.
#[must_use]
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(tag_key(t)))
        .take(MAX_QUERY_TAGS)
        .map(str::to_owned)
        .collect()
}

/// Credit earned by `query_tag` against a single record tag.
#[must_use]
pub fn tag_credit(query_tag: &str, item_tag: &str) -> f64 {
    let q = tag_key(query_tag);
    let t = tag_key(item_tag);
    if q.is_empty() || t.is_empty() {
        return 0.0;
    }
    if q == t {
        return EXACT_CREDIT;
    }
    if is_partial_match(&q, &t) { PARTIAL_CREDIT } else { 0.0 }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Matched query tags (in query order) and the percentage in `[0, 100]`.
///
/// `query_tags` is expected to be normalized already.
#[must_use]
pub fn score<T: Taggable>(query_tags: &[String], item: &T) -> (Vec<String>, f64) {
    if query_tags.is_empty() {
        return (Vec::new(), 0.0);
    }
    let mut matched = Vec::new();
    let mut total = 0.0;
    for query_tag in query_tags {
        let best = item
            .tags()
            .iter()
            .map(|t| tag_credit(query_tag, t))
            .fold(0.0_f64, f64::max);
        if best > 0.0 {
            matched.push(query_tag.clone());
            total += best;
        }
    }
    #[allow(clippy::cast_precision_loss, reason = "query tag count is capped")]
    let percentage = round2(total / query_tags.len() as f64 * 100.0).clamp(0.0, 100.0);
    (matched, percentage)
}

fn by_recency<T: Taggable>(a: &T, b: &T) -> Ordering {
    b.updated_at().cmp(&a.updated_at()).then_with(|| a.id().cmp(b.id()))
}

/// Records carrying every query tag, newest first.
#[must_use]
pub fn precise_search<T: Taggable>(query_tags: &[String], items: Vec<T>) -> Vec<ScoredMatch<T>> {
    let wanted: Vec<String> = query_tags.iter().map(|t| tag_key(t)).collect();
    let mut hits: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let have: HashSet<String> = item.tags().iter().map(|t| tag_key(t)).collect();
            wanted.iter().all(|w| have.contains(w))
        })
        .collect();
    hits.sort_by(by_recency);
    hits.into_iter()
        .map(|item| ScoredMatch { item, matched_tags: query_tags.to_vec(), percentage: 100.0 })
        .collect()
}

/// Records with a non-zero score at or above `min_percentage`, best first.
///
/// Ties are broken by recency, then id, so paging is stable.
#[must_use]
pub fn fuzzy_search<T: Taggable>(
    query_tags: &[String],
    min_percentage: u8,
    items: Vec<T>,
) -> Vec<ScoredMatch<T>> {
    let threshold = f64::from(min_percentage.min(100));
    let mut hits: Vec<ScoredMatch<T>> = items
        .into_iter()
        .filter_map(|item| {
            let (matched_tags, percentage) = score(query_tags, &item);
            (percentage > 0.0 && percentage >= threshold)
                .then_some(ScoredMatch { item, matched_tags, percentage })
        })
        .collect();
    hits.sort_by(|a, b| {
        b.percentage.total_cmp(&a.percentage).then_with(|| by_recency(&a.item, &b.item))
    });
    hits
}

/// Slice a 1-based page out of `matches`. `total` counts all matches.
/// `page_size` is clamped to `1..=MAX_PAGE_SIZE`.
#[must_use]
pub fn paginate<T>(matches: Vec<T>, page: usize, page_size: usize) -> SearchPage<T> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let total = matches.len();
    let skip = (page - 1).saturating_mul(page_size);
    let items = matches.into_iter().skip(skip).take(page_size).collect();
    SearchPage { items, total, page, page_size }
}
