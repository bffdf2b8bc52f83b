use inspira_core::{Favorite, FavoriteTarget};

use super::*;
use crate::FavoriteStore;

#[tokio::test]
async fn add_is_idempotent_per_slot() {
    let storage = create_test_storage();
    let first = Favorite::new("u1".to_owned(), FavoriteTarget::Screen, "s1".to_owned());
    let stored = storage.add_favorite(&first).await.unwrap();
    assert_eq!(stored.id, first.id);

    let again = Favorite::new("u1".to_owned(), FavoriteTarget::Screen, "s1".to_owned());
    let stored_again = storage.add_favorite(&again).await.unwrap();
    assert_eq!(stored_again.id, first.id);
    assert_eq!(storage.list_favorites("u1", None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_filters_by_user_and_target() {
    let storage = create_test_storage();
    for (user, target, id) in [
        ("u1", FavoriteTarget::Screen, "s1"),
        ("u1", FavoriteTarget::Project, "p1"),
        ("u2", FavoriteTarget::Screen, "s1"),
    ] {
        storage.add_favorite(&Favorite::new(user.to_owned(), target, id.to_owned())).await.unwrap();
    }

    assert_eq!(storage.list_favorites("u1", None).await.unwrap().len(), 2);
    let screens = storage.list_favorites("u1", Some(FavoriteTarget::Screen)).await.unwrap();
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].target_id, "s1");
}

#[tokio::test]
async fn remove_and_is_favorite() {
    let storage = create_test_storage();
    storage
        .add_favorite(&Favorite::new("u1".to_owned(), FavoriteTarget::Project, "p1".to_owned()))
        .await
        .unwrap();

    assert!(storage.is_favorite("u1", FavoriteTarget::Project, "p1").await.unwrap());
    assert!(!storage.is_favorite("u1", FavoriteTarget::Screen, "p1").await.unwrap());
    assert!(storage.remove_favorite("u1", FavoriteTarget::Project, "p1").await.unwrap());
    assert!(!storage.remove_favorite("u1", FavoriteTarget::Project, "p1").await.unwrap());
    assert!(!storage.is_favorite("u1", FavoriteTarget::Project, "p1").await.unwrap());
}
