use inspira_core::{ScreenInput, ScreenPatch, SearchMode, TagQuery};

use super::*;
use crate::{ProjectService, ScreenService, ServiceError};

#[tokio::test]
async fn create_requires_image_and_existing_project() {
    let storage = memory_backend();
    let screens = ScreenService::new(Arc::clone(&storage));

    let no_image = ScreenInput { image_url: "  ".to_owned(), ..screen_input("login", &[]) };
    assert!(matches!(screens.create(no_image).await, Err(ServiceError::InvalidInput(_))));

    let orphan = ScreenInput { project_id: Some("ghost".to_owned()), ..screen_input("login", &[]) };
    assert!(screens.create(orphan).await.unwrap_err().is_not_found());

    let project = ProjectService::new(Arc::clone(&storage))
        .create(project_input("App", &[]))
        .await
        .unwrap();
    let owned = ScreenInput { project_id: Some(project.id.clone()), ..screen_input("login", &[]) };
    let screen = screens.create(owned).await.unwrap();
    assert_eq!(screen.project_id.as_deref(), Some(project.id.as_str()));

    let listed = screens.list(Some(&project.id), 1, 20).await.unwrap();
    assert_eq!(listed.total, 1);
}

#[tokio::test]
async fn precise_search_requires_every_tag() {
    let screens = ScreenService::new(memory_backend());
    let both = screens.create(screen_input("both", &["Login", "Form"])).await.unwrap();
    screens.create(screen_input("one", &["login"])).await.unwrap();
    screens.create(screen_input("partial", &["login page", "form"])).await.unwrap();

    let query = TagQuery::new(strings(&["login", "form"]), SearchMode::Precise);
    let page = screens.precise_search(&query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].item.id, both.id);
    assert_eq!(page.items[0].matched_tags, strings(&["login", "form"]));
}

#[tokio::test]
async fn fuzzy_search_scores_and_filters() {
    let screens = ScreenService::new(memory_backend());
    screens.create(screen_input("full", &["login", "form"])).await.unwrap();
    screens.create(screen_input("half", &["login"])).await.unwrap();
    screens.create(screen_input("partial", &["login page"])).await.unwrap();
    screens.create(screen_input("none", &["chart"])).await.unwrap();

    let query = TagQuery::new(strings(&["login", "form"]), SearchMode::Fuzzy);
    let page = screens.fuzzy_search(&query).await.unwrap();
    let got: Vec<(String, f64)> =
        page.items.iter().map(|m| (m.item.name.clone(), m.percentage)).collect();
    assert_eq!(
        got,
        vec![("full".to_owned(), 100.0), ("half".to_owned(), 50.0), ("partial".to_owned(), 25.0)]
    );

    let strict = query.clone().with_min_percentage(50);
    assert_eq!(screens.fuzzy_search(&strict).await.unwrap().total, 2);
}

#[tokio::test]
async fn search_dispatches_on_mode() {
    let screens = ScreenService::new(memory_backend());
    screens.create(screen_input("half", &["login"])).await.unwrap();

    let fuzzy = TagQuery::new(strings(&["login", "form"]), SearchMode::Fuzzy);
    assert_eq!(screens.search(&fuzzy).await.unwrap().total, 1);

    let precise = TagQuery { mode: SearchMode::Precise, ..fuzzy };
    assert_eq!(screens.search(&precise).await.unwrap().total, 0);
}

#[tokio::test]
async fn delete_then_get_is_none() {
    let screens = ScreenService::new(memory_backend());
    let screen = screens.create(screen_input("temp", &[])).await.unwrap();
    assert!(screens.delete(&screen.id).await.unwrap());
    assert!(screens.get(&screen.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_with_blank_project_detaches_screen() {
    let storage = memory_backend();
    let screens = ScreenService::new(Arc::clone(&storage));
    let project = ProjectService::new(Arc::clone(&storage))
        .create(project_input("App", &[]))
        .await
        .unwrap();
    let owned = ScreenInput { project_id: Some(project.id.clone()), ..screen_input("login", &[]) };
    let screen = screens.create(owned).await.unwrap();

    let ghost = ScreenPatch { project_id: Some("ghost".to_owned()), ..ScreenPatch::default() };
    assert!(screens.update(&screen.id, ghost).await.unwrap_err().is_not_found());

    let detach = ScreenPatch { project_id: Some("  ".to_owned()), ..ScreenPatch::default() };
    let updated = screens.update(&screen.id, detach).await.unwrap();
    assert_eq!(updated.project_id, None);
    assert_eq!(screens.list(Some(&project.id), 1, 20).await.unwrap().total, 0);
}
