use serde::Serialize;
use tom_catalog_core::{ConeQuery, Target};
use tom_catalog_storage::{StorageError, TargetStore};

use crate::ServiceError;

/// A target inside a cone and its distance from the cone center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConeMatch {
    pub separation_arcsec: f64,
    pub target: Target,
}

/// Finds positioned targets within an angular radius of a sky position.
///
/// Storage narrows the catalogue to a declination band; membership is then
/// decided by great-circle separation alone, which handles the RA seam and
/// the poles without special cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConeSearchMatcher;

impl ConeSearchMatcher {
    /// Targets inside `cone`, nearest first (ties broken by id).
    pub async fn search(
        &self,
        store: &dyn TargetStore,
        cone: &ConeQuery,
    ) -> Result<Vec<ConeMatch>, StorageError> {
        let (min_dec, max_dec) = cone.dec_band();
        let candidates = store.targets_in_dec_band(min_dec, max_dec).await?;
        let scanned = candidates.len();
        let mut matches: Vec<ConeMatch> = candidates
            .into_iter()
            .filter_map(|target| {
                let position = target.position()?;
                let separation_arcsec = cone.separation_if_inside(&position)?;
                Some(ConeMatch { separation_arcsec, target })
            })
            .collect();
        matches.sort_by(|a, b| {
            a.separation_arcsec.total_cmp(&b.separation_arcsec).then(a.target.id.cmp(&b.target.id))
        });
        tracing::debug!(
            ra = cone.center.ra,
            dec = cone.center.dec,
            radius_arcsec = cone.radius_arcsec,
            scanned,
            matched = matches.len(),
            "Cone search"
        );
        Ok(matches)
    }

    /// Validates raw inputs, then searches. Nothing is queried when a
    /// coordinate or the radius is out of range or not finite.
    pub async fn match_cone_search(
        &self,
        store: &dyn TargetStore,
        ra: f64,
        dec: f64,
        radius_arcsec: f64,
    ) -> Result<Vec<ConeMatch>, ServiceError> {
        let cone = ConeQuery::new(ra, dec, radius_arcsec)?;
        Ok(self.search(store, &cone).await?)
    }
}
