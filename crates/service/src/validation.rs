use std::collections::HashSet;

use inspira_core::{MAX_PAGE_SIZE, tag_key};

use crate::ServiceError;

/// Trimmed, non-empty value of a required text field.
pub(crate) fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

/// Blank optional text collapses to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Record tags: trimmed, blanks dropped, deduplicated case-insensitively.
pub(crate) fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty() && seen.insert(tag_key(t)))
        .collect()
}

/// Row window for a 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub offset: usize,
    pub page: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub(crate) fn new(page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        Self { offset: (page - 1).saturating_mul(page_size), page, page_size }
    }
}
