use inspira_core::{ProjectInput, ProjectPatch, SearchMode, TagQuery};

use super::*;
use crate::{ProjectService, ServiceError};

#[tokio::test]
async fn create_validates_and_cleans_tags() {
    let service = ProjectService::new(memory_backend());

    let err = service.create(project_input("   ", &[])).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let project =
        service.create(project_input("  Wallet ", &["Finance", "finance", " ", "Dark Mode"])).await.unwrap();
    assert_eq!(project.name, "Wallet");
    assert_eq!(project.tags, strings(&["Finance", "Dark Mode"]));
    assert_eq!(service.get(&project.id).await.unwrap(), Some(project));
}

#[tokio::test]
async fn update_missing_project_is_not_found() {
    let service = ProjectService::new(memory_backend());
    let err = service.update("nope", ProjectPatch::default()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_applies_patch() {
    let service = ProjectService::new(memory_backend());
    let project = service.create(project_input("Wallet", &["finance"])).await.unwrap();

    let updated = service
        .update(
            &project.id,
            ProjectPatch { tags: Some(strings(&["travel", "Travel"])), ..ProjectPatch::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.tags, strings(&["travel"]));
    assert!(updated.updated_at >= project.updated_at);
}

#[tokio::test]
async fn list_pages_with_total() {
    let service = ProjectService::new(memory_backend());
    for i in 0..5 {
        service.create(project_input(&format!("p{i}"), &[])).await.unwrap();
    }
    let page = service.list(2, 2).await.unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages(), 3);
}

#[tokio::test]
async fn search_ranks_partial_matches_lower() {
    let service = ProjectService::new(memory_backend());
    let exact = service.create(project_input("exact", &["finance", "mobile app"])).await.unwrap();
    let partial = service.create(project_input("partial", &["personal finance"])).await.unwrap();
    service.create(project_input("other", &["travel"])).await.unwrap();

    let query = TagQuery::new(strings(&["finance", "mobile app"]), SearchMode::Fuzzy);
    let page = service.search(&query).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].item.id, exact.id);
    assert!((page.items[0].percentage - 100.0).abs() < f64::EPSILON);
    assert_eq!(page.items[1].item.id, partial.id);
    assert!((page.items[1].percentage - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn search_rejects_empty_query() {
    let service = ProjectService::new(memory_backend());
    let err = service.search(&TagQuery::new(strings(&[" "]), SearchMode::Fuzzy)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Search(_)));
}

#[tokio::test]
async fn update_with_blank_description_clears_it() {
    let service = ProjectService::new(memory_backend());
    let input = ProjectInput {
        description: Some("neobank".to_owned()),
        cover_url: Some("https://cdn.example.com/wallet.png".to_owned()),
        ..project_input("Wallet", &[])
    };
    let project = service.create(input).await.unwrap();

    let patch = ProjectPatch { description: Some(String::new()), ..ProjectPatch::default() };
    let updated = service.update(&project.id, patch).await.unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(updated.cover_url.as_deref(), Some("https://cdn.example.com/wallet.png"));

    let stored = service.get(&project.id).await.unwrap().unwrap();
    assert_eq!(stored.description, None);
}
