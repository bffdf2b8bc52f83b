//! Persistence for projects, screens, favorites and model configs.
//!
//! PostgreSQL (sqlx) for real deployments, an in-memory backend for tests
//! and for running the CLI without a database. Both sit behind the same
//! store traits and are unified by [`StorageBackend`].

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod backend;
pub mod error;
mod memory;
pub mod pg_migrations;
pub mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
pub use traits::{FavoriteStore, ModelConfigStore, ProjectStore, ScreenStore};
