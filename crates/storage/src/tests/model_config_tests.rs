use inspira_core::ModelPurpose;

use super::*;
use crate::ModelConfigStore;

#[tokio::test]
async fn only_one_default_per_purpose() {
    let storage = create_test_storage();
    let first = create_test_model_config("first", ModelPurpose::Chat, true);
    let second = create_test_model_config("second", ModelPurpose::Chat, true);
    let image = create_test_model_config("image", ModelPurpose::Image, true);
    storage.create_model_config(&first).await.unwrap();
    storage.create_model_config(&image).await.unwrap();
    storage.create_model_config(&second).await.unwrap();

    let default = storage.get_default_model_config(ModelPurpose::Chat).await.unwrap().unwrap();
    assert_eq!(default.id, second.id);
    let demoted = storage.get_model_config(&first.id).await.unwrap().unwrap();
    assert!(!demoted.is_default);

    let image_default = storage.get_default_model_config(ModelPurpose::Image).await.unwrap();
    assert_eq!(image_default.map(|c| c.id), Some(image.id));
}

#[tokio::test]
async fn update_can_promote_existing_config() {
    let storage = create_test_storage();
    let first = create_test_model_config("first", ModelPurpose::Tagging, true);
    let mut second = create_test_model_config("second", ModelPurpose::Tagging, false);
    storage.create_model_config(&first).await.unwrap();
    storage.create_model_config(&second).await.unwrap();

    second.is_default = true;
    storage.update_model_config(&second).await.unwrap();

    let default = storage.get_default_model_config(ModelPurpose::Tagging).await.unwrap().unwrap();
    assert_eq!(default.id, second.id);
}

#[tokio::test]
async fn list_filters_by_purpose_sorted_by_name() {
    let storage = create_test_storage();
    for (name, purpose) in
        [("zeta", ModelPurpose::Chat), ("alpha", ModelPurpose::Chat), ("img", ModelPurpose::Image)]
    {
        storage.create_model_config(&create_test_model_config(name, purpose, false)).await.unwrap();
    }

    let chat: Vec<String> = storage
        .list_model_configs(Some(ModelPurpose::Chat))
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(chat, vec!["alpha", "zeta"]);
    assert_eq!(storage.list_model_configs(None).await.unwrap().len(), 3);
    assert!(storage.get_default_model_config(ModelPurpose::Chat).await.unwrap().is_none());
}
