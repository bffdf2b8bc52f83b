use inspira_core::ScreenPatch;

use super::*;
use crate::ScreenStore;

#[tokio::test]
async fn list_and_count_filter_by_project() {
    let storage = create_test_storage();
    storage.create_screen(&create_test_screen("login", Some("p1"), &[], 0)).await.unwrap();
    storage.create_screen(&create_test_screen("home", Some("p1"), &[], 1)).await.unwrap();
    storage.create_screen(&create_test_screen("loose", None, &[], 2)).await.unwrap();

    assert_eq!(storage.count_screens(None).await.unwrap(), 3);
    assert_eq!(storage.count_screens(Some("p1")).await.unwrap(), 2);
    assert_eq!(storage.count_screens(Some("p2")).await.unwrap(), 0);

    let names: Vec<String> = storage
        .list_screens(Some("p1"), 0, 10)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["login", "home"]);
}

#[tokio::test]
async fn update_persists_patch() {
    let storage = create_test_storage();
    let mut screen = create_test_screen("login", None, &["form"], 5);
    storage.create_screen(&screen).await.unwrap();

    screen.apply(ScreenPatch { tags: Some(keys(&["form", "dark mode"])), ..ScreenPatch::default() });
    storage.update_screen(&screen).await.unwrap();

    let loaded = storage.get_screen(&screen.id).await.unwrap().unwrap();
    assert_eq!(loaded.tags, keys(&["form", "dark mode"]));
}

#[tokio::test]
async fn prefetch_limit_is_respected() {
    let storage = create_test_storage();
    for i in 0..5 {
        storage.create_screen(&create_test_screen(&format!("s{i}"), None, &["card"], i)).await.unwrap();
    }
    let hits = storage.find_screens_matching_any_tag(&keys(&["card"]), 3).await.unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].name, "s0");
}

#[tokio::test]
async fn one_char_query_does_not_partially_match() {
    let storage = create_test_storage();
    storage.create_screen(&create_test_screen("dash", None, &["dashboard"], 0)).await.unwrap();
    let hits = storage.find_screens_matching_any_tag(&keys(&["d"]), 10).await.unwrap();
    assert!(hits.is_empty());
}
