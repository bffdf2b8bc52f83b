//! Core types for inspira
//!
//! Domain records, search types and helpers shared by every other crate.

pub mod constants;
mod chat;
mod env_config;
mod error;
mod favorite;
mod json_utils;
mod model_config;
mod project;
mod screen;
mod search;
mod taxonomy;

pub use chat::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use favorite::*;
pub use json_utils::*;
pub use model_config::*;
pub use project::*;
pub use screen::*;
pub use search::*;
pub use taxonomy::*;
