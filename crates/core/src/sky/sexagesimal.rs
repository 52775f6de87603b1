//! Sexagesimal coordinate strings.
//!
//! Accepts either decimal degrees or `HH:MM:SS.s` / `±DD:MM:SS.s` with colon
//! or whitespace separators, the two forms users paste from finding charts.

use std::sync::LazyLock;

use regex::Regex;

use super::{validate_dec, validate_ra};
use crate::{Result, TomError};

/// Sign, whole units, minutes, seconds.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static SEXAGESIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])?(\d{1,3})[:\s]+(\d{1,2})[:\s]+(\d{1,2}(?:\.\d*)?)$").unwrap()
});

struct Parts {
    negative: bool,
    whole: f64,
    minutes: f64,
    seconds: f64,
}

fn split(raw: &str) -> Option<Parts> {
    let caps = SEXAGESIMAL.captures(raw)?;
    Some(Parts {
        negative: caps.get(1).is_some_and(|m| m.as_str() == "-"),
        whole: caps.get(2)?.as_str().parse().ok()?,
        minutes: caps.get(3)?.as_str().parse().ok()?,
        seconds: caps.get(4)?.as_str().parse().ok()?,
    })
}

fn check_minutes_seconds(raw: &str, parts: &Parts) -> Result<()> {
    if parts.minutes >= 60.0 || parts.seconds >= 60.0 {
        return Err(TomError::InvalidCoordinate(format!(
            "minutes and seconds must be below 60 in {raw:?}"
        )));
    }
    Ok(())
}

/// Parses right ascension as decimal degrees or `HH:MM:SS.s` hours.
pub fn parse_ra(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if let Ok(deg) = trimmed.parse::<f64>() {
        return validate_ra(deg);
    }
    let parts = split(trimmed)
        .ok_or_else(|| TomError::InvalidCoordinate(format!("unrecognised right ascension {raw:?}")))?;
    check_minutes_seconds(raw, &parts)?;
    if parts.negative || parts.whole >= 24.0 {
        return Err(TomError::InvalidCoordinate(format!("hours must be within [0, 24) in {raw:?}")));
    }
    let hours = parts.whole + parts.minutes / 60.0 + parts.seconds / 3600.0;
    validate_ra(hours * 15.0)
}

/// Parses declination as decimal degrees or `±DD:MM:SS.s`.
pub fn parse_dec(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if let Ok(deg) = trimmed.parse::<f64>() {
        return validate_dec(deg);
    }
    let parts = split(trimmed)
        .ok_or_else(|| TomError::InvalidCoordinate(format!("unrecognised declination {raw:?}")))?;
    check_minutes_seconds(raw, &parts)?;
    let magnitude = parts.whole + parts.minutes / 60.0 + parts.seconds / 3600.0;
    validate_dec(if parts.negative { -magnitude } else { magnitude })
}

/// Formats right ascension degrees as `HH:MM:SS.sss`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    reason = "validated RA in milliseconds of time fits comfortably in i64"
)]
pub fn format_ra_hms(ra: f64) -> String {
    let total_ms = (ra.rem_euclid(360.0) / 15.0 * 3_600_000.0).round() as i64;
    let hours = (total_ms / 3_600_000) % 24;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Formats declination degrees as `±DD:MM:SS.ss`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    reason = "validated declination in centi-arcseconds fits comfortably in i64"
)]
pub fn format_dec_dms(dec: f64) -> String {
    let sign = if dec < 0.0 { '-' } else { '+' };
    let total_cs = (dec.abs() * 360_000.0).round() as i64;
    let degrees = total_cs / 360_000;
    let minutes = (total_cs / 6000) % 60;
    let seconds = (total_cs / 100) % 60;
    let centis = total_cs % 100;
    format!("{sign}{degrees:02}:{minutes:02}:{seconds:02}.{centis:02}")
}
