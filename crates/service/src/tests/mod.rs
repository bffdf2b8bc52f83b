//! Service tests against the in-memory backend; Gemini is mocked with wiremock.

use std::sync::Arc;

use inspira_core::{
    DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_TAGGING_MODEL, EnvSettings, ProjectInput,
    ScreenInput,
};
use inspira_storage::StorageBackend;

pub fn memory_backend() -> Arc<StorageBackend> {
    Arc::new(StorageBackend::new_memory())
}

/// Settings pointing Gemini at `base_url` (a wiremock server) when a key is given.
pub fn settings(api_key: Option<&str>, base_url: &str) -> EnvSettings {
    EnvSettings {
        database_url: None,
        gemini_api_key: api_key.map(str::to_owned),
        gemini_base_url: base_url.to_owned(),
        chat_model: DEFAULT_CHAT_MODEL.to_owned(),
        image_model: DEFAULT_IMAGE_MODEL.to_owned(),
        tagging_model: DEFAULT_TAGGING_MODEL.to_owned(),
        taxonomy_path: None,
        pg_max_connections: 1,
    }
}

pub fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_owned()).collect()
}

pub fn project_input(name: &str, tags: &[&str]) -> ProjectInput {
    ProjectInput { name: name.to_owned(), tags: strings(tags), ..ProjectInput::default() }
}

pub fn screen_input(name: &str, tags: &[&str]) -> ScreenInput {
    ScreenInput {
        name: name.to_owned(),
        image_url: format!("https://cdn.example.com/{name}.png"),
        tags: strings(tags),
        ..ScreenInput::default()
    }
}

/// Gemini reply whose single text part is `value` serialized as JSON.
pub fn gemini_json(value: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": value.to_string() }] } }]
    })
}

mod ai_search_tests;
mod project_tests;
mod screen_tests;
