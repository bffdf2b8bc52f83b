use inspira_core::{SearchMode, TaxonomySet};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::{AiSearchService, ModelConfigService, ProjectService, ScreenService, ServiceError};

struct Harness {
    screens: Arc<ScreenService>,
    projects: Arc<ProjectService>,
    service: AiSearchService,
}

fn harness(server_uri: &str) -> Harness {
    let storage = memory_backend();
    let screens = Arc::new(ScreenService::new(Arc::clone(&storage)));
    let projects = Arc::new(ProjectService::new(Arc::clone(&storage)));
    let models = Arc::new(ModelConfigService::new(storage, settings(Some("k"), server_uri)));
    let taxonomies = Arc::new(TaxonomySet::builtin().unwrap());
    let service =
        AiSearchService::new(Arc::clone(&screens), Arc::clone(&projects), models, taxonomies);
    Harness { screens, projects, service }
}

async fn reply_to(server: &MockServer, marker: &str, value: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_json(&value)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn screen_search_runs_full_pipeline() {
    let server = MockServer::start().await;
    reply_to(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": true, "strict": false, "summary": "login forms" }),
    )
    .await;
    reply_to(
        &server,
        "Pick the tag categories",
        serde_json::json!({ "categories": ["page type", "component", "invented"] }),
    )
    .await;
    reply_to(&server, "Category: page type", serde_json::json!({ "tags": ["Login"] })).await;
    reply_to(&server, "Category: component", serde_json::json!({ "tags": ["form", "hologram"] }))
        .await;

    let h = harness(&server.uri());
    let full = h.screens.create(screen_input("full", &["login", "form"])).await.unwrap();
    let half = h.screens.create(screen_input("half", &["login"])).await.unwrap();
    h.screens.create(screen_input("none", &["dashboard"])).await.unwrap();

    let outcome = h.service.search_screens("login screens with a form", 1, 20).await.unwrap();
    assert!(outcome.intent.is_search);
    let query = outcome.query.unwrap();
    assert_eq!(query.mode, SearchMode::Fuzzy);
    assert_eq!(query.tags, strings(&["login", "form"]));

    let page = outcome.page.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].item.id, full.id);
    assert_eq!(page.items[1].item.id, half.id);
}

#[tokio::test]
async fn strict_project_search_is_precise() {
    let server = MockServer::start().await;
    reply_to(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": true, "strict": true, "summary": "" }),
    )
    .await;
    reply_to(&server, "Pick the tag categories", serde_json::json!({ "categories": ["industry"] }))
        .await;
    reply_to(&server, "Category: industry", serde_json::json!({ "tags": ["finance"] })).await;

    let h = harness(&server.uri());
    let bank = h.projects.create(project_input("bank", &["Finance"])).await.unwrap();
    h.projects.create(project_input("blog", &["personal finance"])).await.unwrap();

    let outcome = h.service.search_projects("only finance apps", 1, 20).await.unwrap();
    assert_eq!(outcome.query.as_ref().map(|q| q.mode), Some(SearchMode::Precise));
    let page = outcome.page.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].item.id, bank.id);
}

#[tokio::test]
async fn non_search_request_returns_intent_only() {
    let server = MockServer::start().await;
    reply_to(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": false, "strict": false, "summary": "small talk" }),
    )
    .await;

    let h = harness(&server.uri());
    let outcome = h.service.search_screens("how are you?", 1, 20).await.unwrap();
    assert!(!outcome.intent.is_search);
    assert!(outcome.query.is_none());
    assert!(outcome.page.is_none());
}

#[tokio::test]
async fn blank_requirement_is_invalid_input() {
    let h = harness("http://unused.invalid");
    let err = h.service.search_screens("  ", 1, 20).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn gemini_failure_surfaces_as_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let err = h.service.search_projects("finance apps", 1, 20).await.unwrap_err();
    assert!(matches!(err, ServiceError::Llm(_)));
    assert!(!err.is_transient());
}
