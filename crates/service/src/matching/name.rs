use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use tom_catalog_core::{NameNormalizer, SimpleNormalizer, Target, TargetId};
use tom_catalog_storage::{StorageError, TargetStore};

/// Finds catalogued targets that carry a given name.
#[async_trait]
pub trait NameMatcher: Send + Sync + fmt::Debug {
    /// Targets with a primary name or alias matching `name`, each once, by id.
    async fn match_name(
        &self,
        store: &dyn TargetStore,
        name: &str,
    ) -> Result<Vec<Target>, StorageError>;
}

/// Compares normalized forms of every name in the catalogue.
///
/// Each call reads every primary name and alias and normalizes it, so cost
/// grows linearly with the catalogue. [`ExactNameMatcher`] avoids the scan.
#[derive(Debug, Clone, Default)]
pub struct FuzzyNameMatcher<N = SimpleNormalizer> {
    normalizer: N,
}

impl FuzzyNameMatcher {
    /// Matcher using the plain [`tom_catalog_core::normalize`] rule.
    #[must_use]
    pub const fn simple() -> Self {
        Self { normalizer: SimpleNormalizer }
    }
}

impl<N: NameNormalizer> FuzzyNameMatcher<N> {
    #[must_use]
    pub const fn new(normalizer: N) -> Self {
        Self { normalizer }
    }

    pub const fn normalizer(&self) -> &N {
        &self.normalizer
    }
}

#[async_trait]
impl<N: NameNormalizer> NameMatcher for FuzzyNameMatcher<N> {
    async fn match_name(
        &self,
        store: &dyn TargetStore,
        name: &str,
    ) -> Result<Vec<Target>, StorageError> {
        let key = self.normalizer.normalize(name);
        let rows = store.all_names().await?;
        let ids: BTreeSet<TargetId> = rows
            .iter()
            .filter(|row| self.normalizer.normalize(&row.name) == key)
            .map(|row| row.target_id)
            .collect();
        tracing::debug!(query = name, key = %key, scanned = rows.len(), matched = ids.len(), "Fuzzy name match");
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        store.targets_by_ids(&ids.into_iter().collect::<Vec<_>>()).await
    }
}

/// Case-sensitive equality, evaluated by the store's indexes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNameMatcher;

#[async_trait]
impl NameMatcher for ExactNameMatcher {
    async fn match_name(
        &self,
        store: &dyn TargetStore,
        name: &str,
    ) -> Result<Vec<Target>, StorageError> {
        store.targets_with_exact_name(name).await
    }
}
