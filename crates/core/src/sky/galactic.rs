//! Equatorial (J2000) to galactic coordinate conversion.

/// Right ascension of the north galactic pole, J2000 degrees.
const NGP_RA_DEG: f64 = 192.859_48;
/// Declination of the north galactic pole, J2000 degrees.
const NGP_DEC_DEG: f64 = 27.128_25;
/// Galactic longitude of the north celestial pole, degrees.
const NCP_L_DEG: f64 = 122.931_92;

/// Converts J2000 `(ra, dec)` in degrees to galactic `(l, b)` in degrees.
///
/// `l` is wrapped into `[0, 360)`.
#[must_use]
pub fn to_galactic(ra: f64, dec: f64) -> (f64, f64) {
    let (sin_dec, cos_dec) = dec.to_radians().sin_cos();
    let (sin_ngp, cos_ngp) = NGP_DEC_DEG.to_radians().sin_cos();
    let (sin_dra, cos_dra) = (ra - NGP_RA_DEG).to_radians().sin_cos();

    let sin_b = (sin_dec * sin_ngp + cos_dec * cos_ngp * cos_dra).clamp(-1.0, 1.0);
    let b = sin_b.asin().to_degrees();

    let y = cos_dec * sin_dra;
    let x = sin_dec * cos_ngp - cos_dec * sin_ngp * cos_dra;
    let l = (NCP_L_DEG - y.atan2(x).to_degrees()).rem_euclid(360.0);

    (l, b)
}
