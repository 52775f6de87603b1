//! Service layer for tom-catalog
//!
//! Save-time validation and duplicate matching between the HTTP/CLI front
//! ends and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod config;
mod error;
pub mod matching;
mod target_service;

pub use config::MatchConfig;
pub use error::{Conflict, ServiceError};
pub use matching::{
    ConeMatch, ConeSearchMatcher, ExactNameMatcher, FuzzyNameMatcher, MatchManager,
    MatchManagerFactory, MatchManagerRegistry, NameMatcher, TargetMatchManager,
};
pub use target_service::TargetService;
