use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TomError;

/// Whether a target has fixed equatorial coordinates or follows an orbit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    #[default]
    Sidereal,
    NonSidereal,
}

impl TargetType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Sidereal => "sidereal",
            Self::NonSidereal => "non_sidereal",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = TomError;

    /// Accepts `sidereal` / `non_sidereal` in any case, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sidereal" => Ok(Self::Sidereal),
            "non_sidereal" | "nonsidereal" => Ok(Self::NonSidereal),
            _ => Err(TomError::InvalidTargetType(s.to_owned())),
        }
    }
}
