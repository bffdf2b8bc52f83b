//! Test utilities and module declarations for storage tests.

use chrono::{Duration, Utc};
use inspira_core::{
    ModelConfig, ModelConfigInput, ModelPurpose, Platform, Project, ProjectInput, Screen,
    ScreenInput,
};

use crate::MemoryStorage;

pub fn create_test_storage() -> MemoryStorage {
    MemoryStorage::new()
}

/// Project whose `updated_at` lies `age_minutes` in the past.
pub fn create_test_project(name: &str, tags: &[&str], age_minutes: i64) -> Project {
    let mut project = Project::from_input(ProjectInput {
        name: name.to_owned(),
        platform: Platform::Web,
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        ..ProjectInput::default()
    });
    project.updated_at = Utc::now() - Duration::minutes(age_minutes);
    project
}

pub fn create_test_screen(
    name: &str,
    project_id: Option<&str>,
    tags: &[&str],
    age_minutes: i64,
) -> Screen {
    let mut screen = Screen::from_input(ScreenInput {
        project_id: project_id.map(str::to_owned),
        name: name.to_owned(),
        image_url: format!("https://cdn.example.com/{name}.png"),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        ..ScreenInput::default()
    });
    screen.updated_at = Utc::now() - Duration::minutes(age_minutes);
    screen
}

pub fn create_test_model_config(name: &str, purpose: ModelPurpose, is_default: bool) -> ModelConfig {
    ModelConfig::from_input(ModelConfigInput {
        name: name.to_owned(),
        purpose,
        model: "gemini-2.0-flash".to_owned(),
        base_url: "https://generativelanguage.googleapis.com".to_owned(),
        api_key: "test-key".to_owned(),
        temperature: None,
        is_default,
    })
}

pub fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_owned()).collect()
}

mod favorite_tests;
mod model_config_tests;
mod screen_tests;
