use serde::{Deserialize, Serialize};

use super::{NewTarget, Target, TargetId};
use crate::SkyPosition;

/// What a match manager needs to know about a target under validation.
///
/// `id` is `None` for a target that has not been saved yet. Match managers
/// never use it to filter their results; excluding the target's own record
/// is the validating caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    pub id: Option<TargetId>,
    pub name: String,
    pub aliases: Vec<String>,
    pub position: Option<SkyPosition>,
}

impl TargetCandidate {
    /// Primary name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl From<&NewTarget> for TargetCandidate {
    fn from(target: &NewTarget) -> Self {
        let position = match (target.ra, target.dec) {
            (Some(ra), Some(dec)) => SkyPosition::new(ra, dec).ok(),
            _ => None,
        };
        Self { id: None, name: target.name.clone(), aliases: target.aliases.clone(), position }
    }
}

impl From<&Target> for TargetCandidate {
    fn from(target: &Target) -> Self {
        Self {
            id: Some(target.id),
            name: target.name.clone(),
            aliases: target.aliases.iter().map(|a| a.name.clone()).collect(),
            position: target.position(),
        }
    }
}
