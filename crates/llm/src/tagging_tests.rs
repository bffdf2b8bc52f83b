use inspira_core::{SearchMode, TagCategory, Taxonomy};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::GeminiClient;
use crate::error::LlmError;
use crate::tagging::{Intent, TagResolver};

fn taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        TagCategory {
            name: "page".to_owned(),
            tags: vec!["Login".to_owned(), "Dashboard".to_owned(), "Settings".to_owned()],
        },
        TagCategory {
            name: "component".to_owned(),
            tags: vec!["Card".to_owned(), "Chart".to_owned(), "Form".to_owned()],
        },
        TagCategory { name: "color".to_owned(), tags: vec!["Blue".to_owned()] },
    ])
}

fn json_reply(value: &serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": value.to_string() }] } }]
    }))
}

async fn mount_reply(server: &MockServer, marker: &str, value: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_string_contains(marker))
        .respond_with(json_reply(&value))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("k".to_owned(), server.uri()).unwrap().with_model("tagger".to_owned())
}

#[tokio::test]
async fn detect_intent_parses_flags() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": true, "strict": true, "summary": "login screens" }),
    )
    .await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let intent = TagResolver::new(&client, &taxonomy).detect_intent("login screens only").await.unwrap();
    assert_eq!(
        intent,
        Intent { is_search: true, strict: true, summary: "login screens".to_owned() }
    );
}

#[tokio::test]
async fn blank_requirement_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let err = TagResolver::new(&client, &taxonomy).detect_intent("   ").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidInput(_)));
}

#[tokio::test]
async fn first_level_keeps_only_known_categories() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "Pick the tag categories",
        serde_json::json!({ "categories": ["Component", "made-up", "page", "component"] }),
    )
    .await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let selected =
        TagResolver::new(&client, &taxonomy).select_first_level("dashboards with cards").await.unwrap();
    assert_eq!(selected, vec!["component".to_owned(), "page".to_owned()]);
}

#[tokio::test]
async fn second_level_sanitizes_and_merges_in_category_order() {
    let server = MockServer::start().await;
    mount_reply(&server, "Category: page", serde_json::json!({ "tags": ["dashboard", "Unicorn"] }))
        .await;
    mount_reply(
        &server,
        "Category: component",
        serde_json::json!({ "tags": ["CHART", "card", "chart", "Login"] }),
    )
    .await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let tags = TagResolver::new(&client, &taxonomy)
        .select_second_level(
            "dashboards with charts",
            &["page".to_owned(), "component".to_owned(), "nope".to_owned()],
        )
        .await
        .unwrap();
    assert_eq!(tags, vec!["Dashboard".to_owned(), "Chart".to_owned(), "Card".to_owned()]);
}

#[tokio::test]
async fn resolve_builds_precise_query_for_strict_intent() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": true, "strict": true, "summary": "" }),
    )
    .await;
    mount_reply(&server, "Pick the tag categories", serde_json::json!({ "categories": ["page"] }))
        .await;
    mount_reply(&server, "Category: page", serde_json::json!({ "tags": ["login"] })).await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let query = TagResolver::new(&client, &taxonomy)
        .resolve("exactly login pages", 2, 10)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(query.tags, vec!["Login".to_owned()]);
    assert_eq!(query.mode, SearchMode::Precise);
    assert_eq!((query.page, query.page_size), (2, 10));
}

#[tokio::test]
async fn resolve_defaults_to_fuzzy() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": true, "strict": false, "summary": "" }),
    )
    .await;
    mount_reply(&server, "Pick the tag categories", serde_json::json!({ "categories": ["color"] }))
        .await;
    mount_reply(&server, "Category: color", serde_json::json!({ "tags": ["blue"] })).await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let query =
        TagResolver::new(&client, &taxonomy).resolve("something blue", 1, 20).await.unwrap().unwrap();
    assert_eq!(query.mode, SearchMode::Fuzzy);
    assert_eq!(query.tags, vec!["Blue".to_owned()]);
}

#[tokio::test]
async fn resolve_stops_when_not_a_search() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": false, "strict": false, "summary": "greeting" }),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_string_contains("Pick the"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let resolution =
        TagResolver::new(&client, &taxonomy).resolve_with_intent("hello there", 1, 20).await.unwrap();
    assert!(!resolution.intent.is_search);
    assert!(resolution.query.is_none());
}

#[tokio::test]
async fn resolve_is_none_when_no_tag_survives() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "You classify requests",
        serde_json::json!({ "is_search": true, "strict": false, "summary": "" }),
    )
    .await;
    mount_reply(&server, "Pick the tag categories", serde_json::json!({ "categories": ["page"] }))
        .await;
    mount_reply(&server, "Category: page", serde_json::json!({ "tags": ["spaceship"] })).await;

    let client = client(&server);
    let taxonomy = taxonomy();
    let query = TagResolver::new(&client, &taxonomy).resolve("spaceship pages", 1, 20).await.unwrap();
    assert!(query.is_none());
}
