//! Core types for tom-catalog
//!
//! Domain types shared across all other crates: targets and their aliases,
//! sky coordinates, and the name normalization used by duplicate matching.

mod constants;
mod env_config;
mod error;
mod names;
mod sky;
mod target;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use names::*;
pub use sky::*;
pub use target::*;
