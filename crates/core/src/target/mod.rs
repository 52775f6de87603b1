//! Target records and their aliases.

mod candidate;
mod new_target;
mod target_type;

pub use candidate::*;
pub use new_target::*;
pub use target_type::*;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SkyPosition;

/// Surrogate key of a catalogued target.
///
/// Wrapping in a newtype keeps target ids from being confused with alias ids
/// at call sites that take both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub i64);

impl From<i64> for TargetId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<TargetId> for i64 {
    fn from(v: TargetId) -> Self {
        v.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Alternate identifier owned by exactly one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetName {
    pub id: i64,
    pub target_id: TargetId,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// Osculating orbital elements for a non-sidereal target.
///
/// Only `scheme` is required; which of the remaining elements are meaningful
/// depends on it (e.g. `MPC_MINOR_PLANET` vs `MPC_COMET`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalElements {
    pub scheme: String,
    /// Epoch of elements, MJD.
    pub epoch_of_elements: Option<f64>,
    /// Degrees.
    pub mean_anomaly: Option<f64>,
    /// Degrees.
    pub arg_of_perihelion: Option<f64>,
    pub eccentricity: Option<f64>,
    /// Longitude of the ascending node, degrees.
    pub lng_asc_node: Option<f64>,
    /// Degrees.
    pub inclination: Option<f64>,
    /// Degrees per day.
    pub mean_daily_motion: Option<f64>,
    /// AU.
    pub semimajor_axis: Option<f64>,
    /// Epoch of perihelion, MJD.
    pub epoch_of_perihelion: Option<f64>,
    /// Perihelion distance, AU.
    pub perihdist: Option<f64>,
}

/// A catalogued celestial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Primary name, stored exactly as entered.
    pub name: String,
    pub target_type: TargetType,
    /// Right ascension, degrees.
    pub ra: Option<f64>,
    /// Declination, degrees.
    pub dec: Option<f64>,
    /// Epoch of the coordinates, Julian years.
    pub epoch: Option<f64>,
    /// Proper motion in RA, mas/yr.
    pub pm_ra: Option<f64>,
    /// Proper motion in Dec, mas/yr.
    pub pm_dec: Option<f64>,
    /// Parallax, mas.
    pub parallax: Option<f64>,
    /// Distance, pc.
    pub distance: Option<f64>,
    /// Galactic longitude, derived from ra/dec on save.
    pub galactic_lng: Option<f64>,
    /// Galactic latitude, derived from ra/dec on save.
    pub galactic_lat: Option<f64>,
    pub orbital_elements: Option<OrbitalElements>,
    /// Open-ended key/value attributes.
    pub extra: BTreeMap<String, serde_json::Value>,
    pub aliases: Vec<TargetName>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Target {
    /// Stored position, if both coordinates are present and valid.
    #[must_use]
    pub fn position(&self) -> Option<SkyPosition> {
        match (self.ra, self.dec) {
            (Some(ra), Some(dec)) => SkyPosition::new(ra, dec).ok(),
            _ => None,
        }
    }

    /// Primary name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|a| a.name.as_str()))
    }
}

/// Merges two target lists, keeping the first occurrence of each id.
/// Items from `existing` appear first, then unseen items from `newer`.
#[must_use]
pub fn union_by_id(existing: Vec<Target>, newer: Vec<Target>) -> Vec<Target> {
    let mut seen: HashSet<TargetId> = HashSet::new();
    let mut result = Vec::with_capacity(existing.len().saturating_add(newer.len()));
    for target in existing.into_iter().chain(newer) {
        if seen.insert(target.id) {
            result.push(target);
        }
    }
    result
}
