#![expect(clippy::unwrap_used, reason = "test code")]

use tom_catalog_core::{NewTarget, TargetId};

use super::create_test_storage;
use crate::{NameRow, StorageError};

#[test]
fn add_alias_to_existing_target() {
    let (storage, _dir) = create_test_storage();
    let saved = storage.insert_target(&NewTarget::sidereal("SN2019abc", 1.0, 1.0)).unwrap();

    let alias = storage.add_alias(saved.id, "AT 2019abc").unwrap();
    assert_eq!(alias.target_id, saved.id);
    assert_eq!(storage.get_alias(alias.id).unwrap(), Some(alias.clone()));
    assert_eq!(storage.aliases_for(saved.id).unwrap(), vec![alias]);
}

#[test]
fn add_alias_to_missing_target_is_not_found() {
    let (storage, _dir) = create_test_storage();
    let err = storage.add_alias(TargetId(42), "ghost").unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "target", .. }), "got {err:?}");
}

#[test]
fn same_alias_twice_on_one_target_is_duplicate() {
    let (storage, _dir) = create_test_storage();
    let saved = storage.insert_target(&NewTarget::sidereal("T", 1.0, 1.0)).unwrap();
    storage.add_alias(saved.id, "dup").unwrap();
    assert!(storage.add_alias(saved.id, "dup").unwrap_err().is_duplicate());
}

#[test]
fn remove_alias_reports_whether_it_existed() {
    let (storage, _dir) = create_test_storage();
    let saved = storage.insert_target(&NewTarget::sidereal("T", 1.0, 1.0).alias("x")).unwrap();
    let alias_id = saved.aliases[0].id;
    assert!(storage.remove_alias(alias_id).unwrap());
    assert!(!storage.remove_alias(alias_id).unwrap());
    assert!(storage.aliases_for(saved.id).unwrap().is_empty());
}

#[test]
fn all_names_lists_primary_names_and_aliases() {
    let (storage, _dir) = create_test_storage();
    let a = storage.insert_target(&NewTarget::sidereal("A", 1.0, 1.0).alias("A-alias")).unwrap();
    let b = storage.insert_target(&NewTarget::sidereal("B", 2.0, 2.0)).unwrap();

    let mut names = storage.all_names().unwrap();
    names.sort_by(|x, y| x.name.cmp(&y.name));
    assert_eq!(
        names,
        vec![
            NameRow { target_id: a.id, name: "A".to_owned() },
            NameRow { target_id: a.id, name: "A-alias".to_owned() },
            NameRow { target_id: b.id, name: "B".to_owned() },
        ]
    );
}

#[test]
fn exact_name_lookup_is_case_sensitive_and_covers_aliases() {
    let (storage, _dir) = create_test_storage();
    let a = storage.insert_target(&NewTarget::sidereal("SN2023abc", 1.0, 1.0)).unwrap();
    let b = storage.insert_target(&NewTarget::sidereal("ZTF23x", 2.0, 2.0).alias("SN2023abc")).unwrap();

    let found: Vec<TargetId> =
        storage.targets_with_exact_name("SN2023abc").unwrap().iter().map(|t| t.id).collect();
    assert_eq!(found, vec![a.id, b.id]);
    assert!(storage.targets_with_exact_name("sn2023abc").unwrap().is_empty());
}

#[test]
fn exact_name_lookup_returns_target_once_when_name_repeats_as_alias() {
    let (storage, _dir) = create_test_storage();
    storage.insert_target(&NewTarget::sidereal("M31", 1.0, 1.0).alias("M31")).unwrap();
    assert_eq!(storage.targets_with_exact_name("M31").unwrap().len(), 1);
}

#[test]
fn targets_by_ids_fails_on_undecodable_row() {
    let (storage, _dir) = create_test_storage();
    let saved = storage.insert_target(&NewTarget::sidereal("SN2023abc", 1.0, 1.0)).unwrap();
    storage
        .pool
        .get()
        .unwrap()
        .execute("UPDATE targets SET target_type = 'planet' WHERE id = ?1", [saved.id.0])
        .unwrap();

    let err = storage.targets_by_ids(&[saved.id]).unwrap_err();
    assert!(matches!(err, StorageError::DataCorruption { .. }), "got {err:?}");
    assert!(storage.targets_with_exact_name("SN2023abc").is_err());
}

#[test]
fn corrupt_alias_timestamp_fails_target_loading() {
    let (storage, _dir) = create_test_storage();
    let saved = storage.insert_target(&NewTarget::sidereal("M31", 1.0, 1.0).alias("NGC 224")).unwrap();
    storage
        .pool
        .get()
        .unwrap()
        .execute("UPDATE target_names SET created = 'yesterday' WHERE target_id = ?1", [saved.id.0])
        .unwrap();

    assert!(matches!(
        storage.targets_by_ids(&[saved.id]).unwrap_err(),
        StorageError::DataCorruption { .. }
    ));
}
