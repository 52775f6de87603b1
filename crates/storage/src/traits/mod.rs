//! Storage backend trait abstraction
//!
//! Async domain traits over the catalogue so the service layer can be
//! exercised against any backend, not just [`crate::Storage`].

pub mod target;

pub use target::TargetStore;
