//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use tom_catalog_core::{NewTarget, Target, TargetId, TargetName};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::TargetStore;
use crate::types::{NameRow, PaginatedResult, StorageStats};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg`: `.to_vec()` a `&[T]`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl TargetStore for Storage {
    async fn insert_target(&self, target: &NewTarget) -> Result<Target, StorageError> {
        delegate!(self, insert_target, @ref target)
    }
    async fn update_target(&self, target: &Target) -> Result<Target, StorageError> {
        delegate!(self, update_target, @ref target)
    }
    async fn get_target(&self, id: TargetId) -> Result<Option<Target>, StorageError> {
        delegate!(self, get_target, @val id)
    }
    async fn delete_target(&self, id: TargetId) -> Result<bool, StorageError> {
        delegate!(self, delete_target, @val id)
    }
    async fn list_targets(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<Target>, StorageError> {
        delegate!(self, list_targets, @val offset, @val limit)
    }
    async fn targets_by_ids(&self, ids: &[TargetId]) -> Result<Vec<Target>, StorageError> {
        delegate!(self, targets_by_ids, @slice ids)
    }
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        delegate!(self, get_stats)
    }
    async fn add_alias(&self, target_id: TargetId, name: &str) -> Result<TargetName, StorageError> {
        delegate!(self, add_alias, @val target_id, @str name)
    }
    async fn remove_alias(&self, alias_id: i64) -> Result<bool, StorageError> {
        delegate!(self, remove_alias, @val alias_id)
    }
    async fn get_alias(&self, alias_id: i64) -> Result<Option<TargetName>, StorageError> {
        delegate!(self, get_alias, @val alias_id)
    }
    async fn all_names(&self) -> Result<Vec<NameRow>, StorageError> {
        delegate!(self, all_names)
    }
    async fn targets_with_exact_name(&self, name: &str) -> Result<Vec<Target>, StorageError> {
        delegate!(self, targets_with_exact_name, @str name)
    }
    async fn targets_in_dec_band(
        &self,
        min_dec: f64,
        max_dec: f64,
    ) -> Result<Vec<Target>, StorageError> {
        delegate!(self, targets_in_dec_band, @val min_dec, @val max_dec)
    }
}
