#![expect(clippy::unwrap_used, reason = "test code")]

use tom_catalog_core::NewTarget;

use super::create_test_storage;
use crate::TargetStore;

#[tokio::test]
async fn trait_methods_delegate_to_blocking_storage() {
    let (storage, _dir) = create_test_storage();
    let store: &dyn TargetStore = &storage;

    let saved = store.insert_target(&NewTarget::sidereal("M31", 10.68458, 41.26906)).await.unwrap();
    let alias = store.add_alias(saved.id, "Andromeda").await.unwrap();

    let loaded = store.get_target(saved.id).await.unwrap().unwrap();
    assert_eq!(loaded.aliases, vec![alias.clone()]);
    assert_eq!(store.targets_with_exact_name("Andromeda").await.unwrap().len(), 1);
    assert_eq!(store.targets_in_dec_band(41.0, 42.0).await.unwrap().len(), 1);
    assert_eq!(store.all_names().await.unwrap().len(), 2);
    assert_eq!(store.get_stats().await.unwrap().alias_count, 1);

    assert!(store.remove_alias(alias.id).await.unwrap());
    assert!(store.delete_target(saved.id).await.unwrap());
    assert_eq!(store.list_targets(0, 10).await.unwrap().total, 0);
}
