//! Gemini client for inspira.
//!
//! Multimodal chat, image generation, JSON completions and the two-stage
//! tag resolution that turns a free-text requirement into a [`TagQuery`].
//!
//! [`TagQuery`]: inspira_core::TagQuery

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

pub mod ai_types;
mod chat;
mod client;
mod error;
mod image;
mod json;
mod tagging;

#[cfg(test)]
mod tagging_tests;

pub use client::{GeminiClient, MAX_ERROR_CONTEXT_LEN, truncate};
pub use error::LlmError;
pub use tagging::{Intent, MAX_REQUIREMENT_LEN, Resolution, TagResolver};
