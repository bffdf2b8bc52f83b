//! Shared constants for inspira.
//!
//! Centralizes limits and defaults used by more than one crate.

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound for any page size (DoS protection).
pub const MAX_PAGE_SIZE: usize = 100;

/// Maximum number of candidates loaded by the fuzzy OR-prefetch.
pub const FUZZY_PREFETCH_LIMIT: usize = 1000;

/// Maximum number of distinct tags in one query.
pub const MAX_QUERY_TAGS: usize = 32;

/// Maximum number of first-level categories the tagging model may pick.
pub const MAX_FIRST_LEVEL_CATEGORIES: usize = 5;

/// Maximum number of second-level tags kept per category.
pub const MAX_TAGS_PER_CATEGORY: usize = 8;

/// Upper bound on list endpoints that are not search.
pub const MAX_LIST_LIMIT: usize = 500;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default Gemini endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for multimodal chat.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";

/// Default model for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Default model for intent detection and tag selection.
pub const DEFAULT_TAGGING_MODEL: &str = "gemini-2.0-flash";
