//! Celestial coordinates and cone geometry.
//!
//! All angles are ICRS/J2000 degrees unless a name says otherwise; cone radii
//! are given in arcseconds because that is how duplicate tolerances are quoted.

mod galactic;
mod sexagesimal;

pub use galactic::to_galactic;
pub use sexagesimal::{format_dec_dms, format_ra_hms, parse_dec, parse_ra};

use serde::{Deserialize, Serialize};

use crate::{ARCSEC_PER_DEGREE, DEC_BAND_PADDING_DEG, Result, TomError};

/// Checks that `ra` is finite and within `[0, 360]`, wrapping 360 to 0.
pub fn validate_ra(ra: f64) -> Result<f64> {
    if !ra.is_finite() {
        return Err(TomError::InvalidCoordinate(format!("ra must be finite, got {ra}")));
    }
    if !(0.0..=360.0).contains(&ra) {
        return Err(TomError::InvalidCoordinate(format!("ra must be within [0, 360), got {ra}")));
    }
    Ok(if ra == 360.0 { 0.0 } else { ra })
}

/// Checks that `dec` is finite and within `[-90, 90]`.
pub fn validate_dec(dec: f64) -> Result<f64> {
    if !dec.is_finite() {
        return Err(TomError::InvalidCoordinate(format!("dec must be finite, got {dec}")));
    }
    if !(-90.0..=90.0).contains(&dec) {
        return Err(TomError::InvalidCoordinate(format!("dec must be within [-90, 90], got {dec}")));
    }
    Ok(dec)
}

/// Checks that a cone radius is finite and non-negative.
pub fn validate_radius(radius_arcsec: f64) -> Result<f64> {
    if !radius_arcsec.is_finite() || radius_arcsec < 0.0 {
        return Err(TomError::InvalidRadius(format!(
            "radius must be a finite number of arcseconds >= 0, got {radius_arcsec}"
        )));
    }
    Ok(radius_arcsec)
}

/// Great-circle separation between two sky positions, in degrees.
///
/// Uses the Vincenty form, which stays accurate for both tiny and antipodal
/// separations and is indifferent to the 0/360 right-ascension seam.
#[must_use]
pub fn angular_separation_deg(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let delta_ra = (ra2 - ra1).to_radians();
    let (sin_dec1, cos_dec1) = dec1.to_radians().sin_cos();
    let (sin_dec2, cos_dec2) = dec2.to_radians().sin_cos();
    let (sin_dra, cos_dra) = delta_ra.sin_cos();

    let term1 = cos_dec2 * sin_dra;
    let term2 = cos_dec1 * sin_dec2 - sin_dec1 * cos_dec2 * cos_dra;
    let numerator = term1.hypot(term2);
    let denominator = sin_dec1 * sin_dec2 + cos_dec1 * cos_dec2 * cos_dra;

    numerator.atan2(denominator).to_degrees()
}

/// A validated equatorial position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    /// Right ascension in degrees, `[0, 360)`.
    pub ra: f64,
    /// Declination in degrees, `[-90, 90]`.
    pub dec: f64,
}

impl SkyPosition {
    pub fn new(ra: f64, dec: f64) -> Result<Self> {
        Ok(Self { ra: validate_ra(ra)?, dec: validate_dec(dec)? })
    }

    #[must_use]
    pub fn separation_deg(&self, other: &Self) -> f64 {
        angular_separation_deg(self.ra, self.dec, other.ra, other.dec)
    }

    #[must_use]
    pub fn separation_arcsec(&self, other: &Self) -> f64 {
        self.separation_deg(other) * ARCSEC_PER_DEGREE
    }
}

/// A validated cone: a center position plus a radius in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeQuery {
    pub center: SkyPosition,
    pub radius_arcsec: f64,
}

impl ConeQuery {
    /// Validates all three inputs; nothing is queried with a malformed cone.
    pub fn new(ra: f64, dec: f64, radius_arcsec: f64) -> Result<Self> {
        Ok(Self { center: SkyPosition::new(ra, dec)?, radius_arcsec: validate_radius(radius_arcsec)? })
    }

    #[must_use]
    pub fn radius_deg(&self) -> f64 {
        self.radius_arcsec / ARCSEC_PER_DEGREE
    }

    /// Inclusive declination band that contains every position in the cone.
    ///
    /// Right ascension has no equivalent band: near the poles any RA can be in
    /// range, and across the 0/360 seam the interval splits.
    #[must_use]
    pub fn dec_band(&self) -> (f64, f64) {
        let reach = self.radius_deg() + DEC_BAND_PADDING_DEG;
        ((self.center.dec - reach).max(-90.0), (self.center.dec + reach).min(90.0))
    }

    /// Separation from the center in arcseconds if `position` lies inside the cone.
    #[must_use]
    pub fn separation_if_inside(&self, position: &SkyPosition) -> Option<f64> {
        let separation = self.center.separation_arcsec(position);
        (separation <= self.radius_arcsec).then_some(separation)
    }
}
