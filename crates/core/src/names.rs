//! Name normalization used as the comparison key for duplicate matching.
//!
//! Normalized names are never stored; the catalogue keeps the name exactly as
//! entered and only compares normalized forms.

use std::fmt;

/// Canonical comparison key for a target identifier.
///
/// Lowercases the input, then removes spaces, dashes, underscores and
/// parentheses. Total over all strings (the empty string maps to itself) and
/// idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().chars().filter(|c| !matches!(c, ' ' | '-' | '_' | '(' | ')')).collect()
}

/// Replaceable normalization step for fuzzy name matching.
///
/// Implementations must be idempotent: `normalize(normalize(x)) == normalize(x)`.
pub trait NameNormalizer: Send + Sync + fmt::Debug {
    /// Comparison key for `raw`.
    fn normalize(&self, raw: &str) -> String;
}

/// The plain [`normalize`] rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleNormalizer;

impl NameNormalizer for SimpleNormalizer {
    fn normalize(&self, raw: &str) -> String {
        normalize(raw)
    }
}

/// Treats the `AT` and `SN` transient designation prefixes as equivalent.
///
/// A TNS transient keeps its year-and-letters designation when it is
/// classified, so `AT 2019abc` and `SN2019abc` name the same object. Only a
/// prefix directly followed by a digit is rewritten, so names such as
/// `ATLAS19xyz` are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientPrefixNormalizer;

impl NameNormalizer for TransientPrefixNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let simple = normalize(raw);
        match simple.strip_prefix("at") {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => format!("sn{rest}"),
            _ => simple,
        }
    }
}
