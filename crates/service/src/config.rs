use tom_catalog_core::{
    DEFAULT_CONE_RADIUS_ARCSEC, DEFAULT_MATCH_MANAGER, env_parse_with_default, validate_radius,
};

use crate::ServiceError;

/// Match manager selection, resolved once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Registry name of the match manager (`TOM_MATCH_MANAGER`).
    pub manager: String,
    /// Radius used by managers that union in a cone search
    /// (`TOM_CONE_SEARCH_RADIUS_ARCSEC`).
    pub cone_radius_arcsec: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            manager: DEFAULT_MATCH_MANAGER.to_owned(),
            cone_radius_arcsec: DEFAULT_CONE_RADIUS_ARCSEC,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            manager: env_parse_with_default("TOM_MATCH_MANAGER", DEFAULT_MATCH_MANAGER.to_owned()),
            cone_radius_arcsec: env_parse_with_default(
                "TOM_CONE_SEARCH_RADIUS_ARCSEC",
                DEFAULT_CONE_RADIUS_ARCSEC,
            ),
        }
    }

    /// Rejects a configuration the process must not start with.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.manager.trim().is_empty() {
            return Err(ServiceError::Configuration("match manager name is empty".to_owned()));
        }
        validate_radius(self.cone_radius_arcsec).map_err(|e| {
            ServiceError::Configuration(format!("TOM_CONE_SEARCH_RADIUS_ARCSEC: {e}"))
        })?;
        Ok(())
    }
}
