//! Request/query types (Deserialize)

use serde::Deserialize;
use tom_catalog_core::{DEFAULT_CONE_RADIUS_ARCSEC, DEFAULT_QUERY_LIMIT, Result, parse_dec, parse_ra};

const fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

const fn default_radius() -> f64 {
    DEFAULT_CONE_RADIUS_ARCSEC
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub name: String,
    /// Exact, case-sensitive equality instead of the configured matcher.
    #[serde(default)]
    pub exact: bool,
}

/// `ra`/`dec` accept decimal degrees or sexagesimal (`10:42:44.3`, `+41:16:08`).
#[derive(Debug, Deserialize)]
pub struct ConeSearchQuery {
    pub ra: String,
    pub dec: String,
    /// Arcseconds.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl ConeSearchQuery {
    pub fn degrees(&self) -> Result<(f64, f64)> {
        Ok((parse_ra(&self.ra)?, parse_dec(&self.dec)?))
    }
}

#[derive(Debug, Deserialize)]
pub struct AliasRequest {
    pub name: String,
}
