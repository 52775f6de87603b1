use async_trait::async_trait;
use tom_catalog_core::{NewTarget, Target, TargetId, TargetName};

use crate::error::StorageError;
use crate::types::{NameRow, PaginatedResult, StorageStats};

/// Target catalogue operations.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Insert a target and its aliases without any duplicate matching.
    async fn insert_target(&self, target: &NewTarget) -> Result<Target, StorageError>;

    /// Overwrite a stored target's fields (aliases excepted).
    async fn update_target(&self, target: &Target) -> Result<Target, StorageError>;

    /// Get target by id, aliases included.
    async fn get_target(&self, id: TargetId) -> Result<Option<Target>, StorageError>;

    /// Delete target and its aliases. Returns `true` if a row was deleted.
    async fn delete_target(&self, id: TargetId) -> Result<bool, StorageError>;

    /// Targets ordered by id, with pagination.
    async fn list_targets(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<Target>, StorageError>;

    /// Targets for the given ids, in the order given.
    async fn targets_by_ids(&self, ids: &[TargetId]) -> Result<Vec<Target>, StorageError>;

    /// Catalogue statistics.
    async fn get_stats(&self) -> Result<StorageStats, StorageError>;

    /// Attach an alias to an existing target.
    async fn add_alias(&self, target_id: TargetId, name: &str) -> Result<TargetName, StorageError>;

    /// Remove an alias. Returns `true` if a row was deleted.
    async fn remove_alias(&self, alias_id: i64) -> Result<bool, StorageError>;

    /// Get alias by id.
    async fn get_alias(&self, alias_id: i64) -> Result<Option<TargetName>, StorageError>;

    /// Every primary name and alias with its owning target id.
    async fn all_names(&self) -> Result<Vec<NameRow>, StorageError>;

    /// Targets with a primary name or alias exactly equal to `name`.
    async fn targets_with_exact_name(&self, name: &str) -> Result<Vec<Target>, StorageError>;

    /// Positioned targets inside an inclusive declination band.
    async fn targets_in_dec_band(
        &self,
        min_dec: f64,
        max_dec: f64,
    ) -> Result<Vec<Target>, StorageError>;
}
