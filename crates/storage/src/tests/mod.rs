//! Test utilities and module declarations for storage tests.

use crate::Storage;
use tempfile::TempDir;
use tom_catalog_core::{NewTarget, OrbitalElements};

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::with_pool_size(&db_path, 4).unwrap();
    (storage, temp_dir)
}

pub fn create_test_comet(name: &str) -> NewTarget {
    NewTarget::non_sidereal(
        name,
        OrbitalElements {
            scheme: "MPC_COMET".to_owned(),
            eccentricity: Some(0.9993),
            perihdist: Some(0.295),
            inclination: Some(128.9),
            ..OrbitalElements::default()
        },
    )
}

mod async_store_tests;
mod name_tests;
