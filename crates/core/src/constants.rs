//! Shared constants for tom-catalog.

/// Arcseconds in one degree.
pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Cone radius used by match managers that union in a proximity check.
pub const DEFAULT_CONE_RADIUS_ARCSEC: f64 = 2.0;

/// Padding applied to the declination pre-filter so float round-off at the
/// band edge never drops a row the exact separation would keep.
pub const DEC_BAND_PADDING_DEG: f64 = 1e-9;

/// Maximum number of results for any listing query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default page size when the caller does not specify one.
pub const DEFAULT_QUERY_LIMIT: usize = 20;

/// SQLite connection pool size when `TOM_DB_POOL_SIZE` is unset.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Registry name of the match manager used when `TOM_MATCH_MANAGER` is unset.
pub const DEFAULT_MATCH_MANAGER: &str = "default";
