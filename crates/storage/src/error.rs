//! Errors shared by the Postgres and in-memory backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Project, screen or model config missing on update.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A record id reused on insert, or a second default model config
    /// racing the partial unique index.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Stored tags JSON, platform or purpose that no longer parses.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema setup failed on connect.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entity, id: id.into() }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// `RowNotFound` → generic `NotFound`, SQLSTATE 23505 → `Duplicate`,
/// everything else → `Database`.
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "tags JSON".to_owned(),
            source: Box::new(err),
        }
    }
}

impl From<inspira_core::CoreError> for StorageError {
    fn from(err: inspira_core::CoreError) -> Self {
        Self::DataCorruption {
            context: "stored value failed to parse".to_owned(),
            source: Box::new(err),
        }
    }
}
