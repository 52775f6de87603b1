//! Save-time validation of targets and aliases.
//!
//! The storage layer inserts whatever it is given. Every write that must not
//! create a duplicate goes through [`TargetService`], which asks the configured
//! [`MatchManager`] for candidates and rejects the save when any candidate is
//! a different target.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tom_catalog_core::{
    MAX_QUERY_LIMIT, NewTarget, OrbitalElements, Target, TargetCandidate, TargetId, TargetName,
    TargetType, TargetUpdate, normalize, validate_dec, validate_ra,
};
use tom_catalog_storage::{PaginatedResult, StorageStats, TargetStore};

use crate::matching::{ConeMatch, ConeSearchMatcher, MatchManager, MatchManagerRegistry};
use crate::{Conflict, MatchConfig, ServiceError};

/// Checks the fields that do not depend on the rest of the catalogue and
/// returns the position with RA wrapped into `[0, 360)`.
fn validate_fields(
    name: &str,
    target_type: TargetType,
    ra: Option<f64>,
    dec: Option<f64>,
    orbital_elements: Option<&OrbitalElements>,
) -> Result<(Option<f64>, Option<f64>), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("target name must not be empty".to_owned()));
    }
    let ra = ra.map(validate_ra).transpose()?;
    let dec = dec.map(validate_dec).transpose()?;
    if ra.is_some() != dec.is_some() {
        return Err(ServiceError::InvalidInput("ra and dec must be given together".to_owned()));
    }
    match target_type {
        TargetType::Sidereal if ra.is_none() => {
            return Err(ServiceError::InvalidInput("sidereal targets require ra and dec".to_owned()));
        },
        TargetType::NonSidereal
            if orbital_elements.is_none_or(|elements| elements.scheme.trim().is_empty()) =>
        {
            return Err(ServiceError::InvalidInput(
                "non-sidereal targets require orbital elements with a scheme".to_owned(),
            ));
        },
        _ => {},
    }
    Ok((ra, dec))
}

/// Rejects names of one target that normalize to the same key.
fn check_own_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), ServiceError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("alias must not be empty".to_owned()));
        }
        if let Some(first) = seen.insert(normalize(name), name) {
            return Err(ServiceError::InvalidInput(format!(
                "name '{name}' is equivalent to '{first}' on the same target"
            )));
        }
    }
    Ok(())
}

pub struct TargetService {
    store: Arc<dyn TargetStore>,
    matcher: Arc<dyn MatchManager>,
    cone: ConeSearchMatcher,
    /// Held from the duplicate check until the write lands.
    write_lock: Mutex<()>,
}

impl TargetService {
    #[must_use]
    pub fn new(store: Arc<dyn TargetStore>, matcher: Arc<dyn MatchManager>) -> Self {
        Self { store, matcher, cone: ConeSearchMatcher, write_lock: Mutex::new(()) }
    }

    /// Resolves the configured match manager; fails on an unknown name.
    pub fn from_config(
        store: Arc<dyn TargetStore>,
        registry: &MatchManagerRegistry,
        config: &MatchConfig,
    ) -> Result<Self, ServiceError> {
        let matcher = registry.resolve(Arc::clone(&store), config)?;
        Ok(Self::new(store, matcher))
    }

    #[must_use]
    pub fn matcher(&self) -> &Arc<dyn MatchManager> {
        &self.matcher
    }

    /// Field-level validation of an unsaved target. Returns the target with
    /// its position normalized.
    pub fn validate(&self, target: &NewTarget) -> Result<NewTarget, ServiceError> {
        let (ra, dec) = validate_fields(
            &target.name,
            target.target_type,
            target.ra,
            target.dec,
            target.orbital_elements.as_ref(),
        )?;
        check_own_names(
            std::iter::once(target.name.as_str()).chain(target.aliases.iter().map(String::as_str)),
        )?;
        Ok(NewTarget { ra, dec, ..target.clone() })
    }

    /// Fails with [`ServiceError::Duplicate`] if the match manager reports any
    /// target other than the candidate itself.
    pub async fn validate_unique(&self, candidate: &TargetCandidate) -> Result<(), ServiceError> {
        let conflicts: Vec<Conflict> = self
            .matcher
            .match_target(candidate)
            .await?
            .iter()
            .filter(|t| Some(t.id) != candidate.id)
            .map(Conflict::from)
            .collect();
        if conflicts.is_empty() {
            return Ok(());
        }
        tracing::info!(
            name = %candidate.name,
            conflicts = conflicts.len(),
            manager = self.matcher.kind(),
            "Rejected duplicate target"
        );
        Err(ServiceError::Duplicate { name: candidate.name.clone(), conflicts })
    }

    /// Validate, check for duplicates and insert.
    pub async fn create(&self, target: NewTarget) -> Result<Target, ServiceError> {
        let target = self.validate(&target)?;
        let _guard = self.write_lock.lock().await;
        self.validate_unique(&TargetCandidate::from(&target)).await?;
        let saved = self.store.insert_target(&target).await?;
        tracing::info!(target_id = %saved.id, name = %saved.name, "Created target");
        Ok(saved)
    }

    /// Insert without any validation or duplicate check.
    ///
    /// This is the raw storage path; it can create duplicates.
    pub async fn create_unchecked(&self, target: NewTarget) -> Result<Target, ServiceError> {
        Ok(self.store.insert_target(&target).await?)
    }

    /// Apply a partial update.
    ///
    /// Duplicate matching runs only when the update sets the name or position;
    /// the target's own record never counts as a conflict.
    pub async fn update(&self, id: TargetId, update: TargetUpdate) -> Result<Target, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.get(id).await?;
        let mut updated = update.apply_to(&existing);
        let (ra, dec) = validate_fields(
            &updated.name,
            updated.target_type,
            updated.ra,
            updated.dec,
            updated.orbital_elements.as_ref(),
        )?;
        updated.ra = ra;
        updated.dec = dec;
        if update.touches_identity() {
            check_own_names(updated.names())?;
            self.validate_unique(&TargetCandidate::from(&updated)).await?;
        }
        let saved = self.store.update_target(&updated).await?;
        tracing::info!(target_id = %id, "Updated target");
        Ok(saved)
    }

    /// Attach an alias after checking it against the target's own names and
    /// the rest of the catalogue.
    pub async fn add_alias(&self, target_id: TargetId, name: &str) -> Result<TargetName, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let target = self.get(target_id).await?;
        check_own_names(target.names().chain(std::iter::once(name)))?;

        let conflicts: Vec<Conflict> = self
            .matcher
            .match_name(name)
            .await?
            .iter()
            .filter(|t| t.id != target_id)
            .map(Conflict::from)
            .collect();
        if !conflicts.is_empty() {
            return Err(ServiceError::Duplicate { name: name.to_owned(), conflicts });
        }
        let alias = self.store.add_alias(target_id, name).await?;
        tracing::info!(target_id = %target_id, alias_id = alias.id, name, "Added alias");
        Ok(alias)
    }

    pub async fn remove_alias(&self, alias_id: i64) -> Result<(), ServiceError> {
        if self.store.remove_alias(alias_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound { entity: "alias", id: alias_id.to_string() })
        }
    }

    pub async fn get(&self, id: TargetId) -> Result<Target, ServiceError> {
        self.store.get_target(id).await?.ok_or_else(|| ServiceError::target_not_found(id))
    }

    /// Page of targets; `limit` is capped at `MAX_QUERY_LIMIT`.
    pub async fn list(&self, offset: usize, limit: usize) -> Result<PaginatedResult<Target>, ServiceError> {
        Ok(self.store.list_targets(offset, limit.min(MAX_QUERY_LIMIT)).await?)
    }

    pub async fn delete(&self, id: TargetId) -> Result<(), ServiceError> {
        if self.store.delete_target(id).await? {
            tracing::info!(target_id = %id, "Deleted target");
            Ok(())
        } else {
            Err(ServiceError::target_not_found(id))
        }
    }

    /// Name lookup through the configured manager, or exact equality.
    pub async fn match_name(&self, name: &str, exact: bool) -> Result<Vec<Target>, ServiceError> {
        let found = if exact {
            self.matcher.match_exact_name(name).await?
        } else {
            self.matcher.match_name(name).await?
        };
        Ok(found)
    }

    /// Cone search with separations; inputs are validated first.
    pub async fn cone_search(
        &self,
        ra: f64,
        dec: f64,
        radius_arcsec: f64,
    ) -> Result<Vec<ConeMatch>, ServiceError> {
        self.cone.match_cone_search(&*self.store, ra, dec, radius_arcsec).await
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.store.get_stats().await?)
    }
}
