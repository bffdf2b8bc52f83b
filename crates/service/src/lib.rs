//! Service layer for inspira
//!
//! Centralizes business logic between the CLI and storage/llm/search.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod ai_search_service;
mod chat_service;
mod error;
mod favorite_service;
mod model_config_service;
mod project_service;
mod screen_service;
mod validation;

#[cfg(test)]
mod tests;

pub use ai_search_service::{AiSearchOutcome, AiSearchService};
pub use chat_service::ChatService;
pub use error::ServiceError;
pub use favorite_service::{FavoriteItem, FavoriteService};
pub use model_config_service::ModelConfigService;
pub use project_service::ProjectService;
pub use screen_service::ScreenService;
