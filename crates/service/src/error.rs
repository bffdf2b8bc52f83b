//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM and search failures into a single error type,
//! enabling callers to match on specific failure modes.

use inspira_llm::LlmError;
use inspira_search::SearchError;
use inspira_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Gemini API call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    #[error("search: {0}")]
    Search(#[from] SearchError),

    /// Caller provided invalid input (blank name, empty prompt, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No model configuration or API key for the requested purpose.
    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::Storage(StorageError::not_found(entity, id))
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Llm(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<inspira_core::CoreError> for ServiceError {
    fn from(err: inspira_core::CoreError) -> Self {
        match err {
            inspira_core::CoreError::Serialization(e) => Self::Serialization(e),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
