//! Duplicate-candidate matching.
//!
//! [`NameMatcher`] implementations find targets by name, [`ConeSearchMatcher`]
//! finds them by position, and a [`MatchManager`] composes both into the
//! candidate set that save-time validation inspects. Which manager a process
//! uses is chosen once at start-up through the [`MatchManagerRegistry`].

mod cone;
mod manager;
mod name;
mod registry;

pub use cone::{ConeMatch, ConeSearchMatcher};
pub use manager::{MatchManager, TargetMatchManager};
pub use name::{ExactNameMatcher, FuzzyNameMatcher, NameMatcher};
pub use registry::{MatchManagerFactory, MatchManagerRegistry};
