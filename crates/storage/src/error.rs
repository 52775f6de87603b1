//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, duplicate, transient
//! lock contention) instead of downcasting opaque boxes.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Row data could not be deserialized into domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// The blocking task running a query panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Task(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Pool(_) => true,
            Self::Database(rusqlite::Error::SqliteFailure(e, _)) => {
                matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
            },
            _ => false,
        }
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Maps `rusqlite` failures onto the variants callers match on.
///
/// - `QueryReturnedNoRows` → `NotFound` (generic; callers should remap with entity context)
/// - constraint violations → `Duplicate`
/// - everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                Self::Duplicate(msg.clone().unwrap_or_else(|| e.to_string()))
            },
            _ => Self::Database(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_maps_to_not_found() {
        let err = StorageError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn constraint_violation_maps_to_duplicate() {
        let failure = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE);
        let err = StorageError::from(rusqlite::Error::SqliteFailure(
            failure,
            Some("UNIQUE constraint failed: target_names.target_id, target_names.name".to_owned()),
        ));
        assert!(err.is_duplicate());
        assert!(err.to_string().contains("UNIQUE constraint failed"));
    }

    #[test]
    fn busy_database_is_transient() {
        let failure = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY);
        let err = StorageError::from(rusqlite::Error::SqliteFailure(failure, None));
        assert!(err.is_transient());
        assert!(!err.is_duplicate());
    }
}
