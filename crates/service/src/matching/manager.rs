use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tom_catalog_core::{
    ConeQuery, NameNormalizer, Target, TargetCandidate, union_by_id, validate_radius,
};
use tom_catalog_storage::{StorageError, TargetStore};

use super::{ConeSearchMatcher, ExactNameMatcher, FuzzyNameMatcher, NameMatcher};

/// Produces the duplicate-candidate set for a target.
///
/// A manager only reports candidates. It never decides that something is a
/// duplicate and never drops the candidate's own record from its results;
/// both are the validating caller's job. The only errors it returns come
/// from storage.
#[async_trait]
pub trait MatchManager: Send + Sync + fmt::Debug {
    /// Registry name, for logs and listings.
    fn kind(&self) -> &str;

    /// Radius of the cone search unioned into [`MatchManager::match_target`],
    /// if any. Must be finite and non-negative; the registry refuses to
    /// resolve a manager reporting anything else.
    fn cone_radius_arcsec(&self) -> Option<f64> {
        None
    }

    /// Name lookup used during save-time validation.
    async fn match_name(&self, name: &str) -> Result<Vec<Target>, StorageError>;

    /// Targets whose names normalize to the same key as `name`.
    async fn match_fuzzy_name(&self, name: &str) -> Result<Vec<Target>, StorageError>;

    /// Targets with a name exactly equal to `name`.
    async fn match_exact_name(&self, name: &str) -> Result<Vec<Target>, StorageError>;

    /// Positioned targets inside `cone`, nearest first.
    async fn match_cone_search(&self, cone: &ConeQuery) -> Result<Vec<Target>, StorageError>;

    /// Everything that might duplicate `candidate`: [`MatchManager::match_name`]
    /// over its primary name and every alias, plus a cone search around its
    /// position when [`MatchManager::cone_radius_arcsec`] is set.
    async fn match_target(&self, candidate: &TargetCandidate) -> Result<Vec<Target>, StorageError> {
        let mut matches = Vec::new();
        for name in candidate.names() {
            matches = union_by_id(matches, self.match_name(name).await?);
        }
        if let (Some(radius_arcsec), Some(center)) = (self.cone_radius_arcsec(), candidate.position) {
            let cone = ConeQuery { center, radius_arcsec };
            matches = union_by_id(matches, self.match_cone_search(&cone).await?);
        }
        Ok(matches)
    }
}

/// The stock [`MatchManager`]: one [`NameMatcher`] for validation lookups and
/// an optional cone radius.
///
/// `TargetMatchManager::new` gives fuzzy, name-only matching.
pub struct TargetMatchManager {
    kind: String,
    store: Arc<dyn TargetStore>,
    fuzzy: Arc<dyn NameMatcher>,
    exact: Arc<dyn NameMatcher>,
    use_exact: bool,
    cone: ConeSearchMatcher,
    cone_radius_arcsec: Option<f64>,
}

impl fmt::Debug for TargetMatchManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetMatchManager")
            .field("kind", &self.kind)
            .field("fuzzy", &self.fuzzy)
            .field("use_exact", &self.use_exact)
            .field("cone_radius_arcsec", &self.cone_radius_arcsec)
            .finish_non_exhaustive()
    }
}

impl TargetMatchManager {
    #[must_use]
    pub fn new(store: Arc<dyn TargetStore>) -> Self {
        Self {
            kind: "default".to_owned(),
            store,
            fuzzy: Arc::new(FuzzyNameMatcher::simple()),
            exact: Arc::new(ExactNameMatcher),
            use_exact: false,
            cone: ConeSearchMatcher,
            cone_radius_arcsec: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Replace the normalization step of fuzzy matching.
    #[must_use]
    pub fn with_normalizer<N: NameNormalizer + 'static>(mut self, normalizer: N) -> Self {
        self.fuzzy = Arc::new(FuzzyNameMatcher::new(normalizer));
        self
    }

    /// Validate names by exact equality instead of the fuzzy scan.
    #[must_use]
    pub const fn exact_names(mut self) -> Self {
        self.use_exact = true;
        self
    }

    /// Union a cone search of `radius_arcsec` into [`MatchManager::match_target`].
    ///
    /// Fails on a negative or non-finite radius.
    pub fn with_cone_radius(mut self, radius_arcsec: f64) -> tom_catalog_core::Result<Self> {
        self.cone_radius_arcsec = Some(validate_radius(radius_arcsec)?);
        Ok(self)
    }
}

#[async_trait]
impl MatchManager for TargetMatchManager {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn cone_radius_arcsec(&self) -> Option<f64> {
        self.cone_radius_arcsec
    }

    async fn match_name(&self, name: &str) -> Result<Vec<Target>, StorageError> {
        if self.use_exact {
            self.match_exact_name(name).await
        } else {
            self.match_fuzzy_name(name).await
        }
    }

    async fn match_fuzzy_name(&self, name: &str) -> Result<Vec<Target>, StorageError> {
        self.fuzzy.match_name(&*self.store, name).await
    }

    async fn match_exact_name(&self, name: &str) -> Result<Vec<Target>, StorageError> {
        self.exact.match_name(&*self.store, name).await
    }

    async fn match_cone_search(&self, cone: &ConeQuery) -> Result<Vec<Target>, StorageError> {
        let matches = self.cone.search(&*self.store, cone).await?;
        Ok(matches.into_iter().map(|m| m.target).collect())
    }
}
