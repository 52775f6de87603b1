//! Storage types shared across modules

use serde::{Deserialize, Serialize};
use tom_catalog_core::TargetId;

/// Statistics about catalogue contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StorageStats {
    /// Number of targets in the catalogue.
    pub target_count: u64,
    /// Number of aliases across all targets.
    pub alias_count: u64,
    /// Targets with both ra and dec set.
    pub positioned_count: u64,
}

/// Generic paginated result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PaginatedResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Offset from the start.
    pub offset: u64,
    /// Maximum items per page.
    pub limit: u64,
}

/// One name row: a primary name or an alias, with its owning target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRow {
    pub target_id: TargetId,
    pub name: String,
}
