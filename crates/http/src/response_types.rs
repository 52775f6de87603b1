//! Response types (Serialize)

use serde::Serialize;
use tom_catalog_core::Target;
use tom_catalog_service::ConeMatch;
use tom_catalog_storage::StorageStats;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub match_manager: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub query: String,
    pub exact: bool,
    pub manager: String,
    pub matches: Vec<Target>,
}

#[derive(Debug, Serialize)]
pub struct ConeSearchResponse {
    pub ra: f64,
    pub dec: f64,
    pub radius_arcsec: f64,
    pub matches: Vec<ConeMatch>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub match_manager: String,
    #[serde(flatten)]
    pub stats: StorageStats,
}
