//! Storage layer for tom-catalog
//!
//! SQLite target catalogue behind an r2d2 connection pool. Synchronous
//! inherent methods on [`Storage`] do the work; the async [`TargetStore`]
//! trait runs them on the blocking pool for the service layer.

mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;
mod types;

pub use error::StorageError;
pub use storage::Storage;
pub use traits::TargetStore;
pub use types::{NameRow, PaginatedResult, StorageStats};
