//! Typed error enum for the service layer.
//!
//! Unifies storage failures with validation outcomes so front ends can map
//! each failure mode to a response without string matching.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tom_catalog_core::{Target, TargetId, TomError};
use tom_catalog_storage::StorageError;

/// An existing target that a save would duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub id: TargetId,
    pub name: String,
}

impl From<&Target> for Conflict {
    fn from(target: &Target) -> Self {
        Self { id: target.id, name: target.name.clone() }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} '{}'", self.id, self.name)
    }
}

fn list_conflicts(conflicts: &[Conflict]) -> String {
    conflicts.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (bad coordinates, missing fields).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Saving would duplicate one or more catalogued targets.
    #[error("duplicate target '{name}': matches existing {}", list_conflicts(.conflicts))]
    Duplicate { name: String, conflicts: Vec<Conflict> },

    /// Requested entity does not exist.
    #[error("not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    /// Start-up configuration cannot be honoured.
    #[error("configuration: {0}")]
    Configuration(String),
}

impl ServiceError {
    pub(crate) fn target_not_found(id: TargetId) -> Self {
        Self::NotFound { entity: "target", id: id.to_string() }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. }) || matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<TomError> for ServiceError {
    fn from(err: TomError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_lists_every_conflict() {
        let err = ServiceError::Duplicate {
            name: "sn 2023abc".to_owned(),
            conflicts: vec![
                Conflict { id: TargetId(3), name: "SN2023abc".to_owned() },
                Conflict { id: TargetId(9), name: "ZTF23abcdefg".to_owned() },
            ],
        };
        assert_eq!(
            err.to_string(),
            "duplicate target 'sn 2023abc': matches existing #3 'SN2023abc', #9 'ZTF23abcdefg'"
        );
        assert!(err.is_duplicate());
        assert!(!err.is_not_found());
    }

    #[test]
    fn core_errors_become_invalid_input() {
        let err = ServiceError::from(TomError::InvalidRadius("radius must be >= 0".to_owned()));
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("radius")));
    }

    #[test]
    fn storage_not_found_counts_as_not_found() {
        let err = ServiceError::from(StorageError::NotFound { entity: "target", id: "1".to_owned() });
        assert!(err.is_not_found());
        assert!(!err.is_transient());
    }
}
