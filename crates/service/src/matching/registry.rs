use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tom_catalog_core::{TransientPrefixNormalizer, validate_radius};
use tom_catalog_storage::TargetStore;

use super::{MatchManager, TargetMatchManager};
use crate::{MatchConfig, ServiceError};

/// Builds a match manager over a store with the start-up configuration.
///
/// A factory that cannot build its manager from the configuration returns
/// an error, which [`MatchManagerRegistry::resolve`] reports as fatal.
pub type MatchManagerFactory = Arc<
    dyn Fn(Arc<dyn TargetStore>, &MatchConfig) -> Result<Arc<dyn MatchManager>, ServiceError>
        + Send
        + Sync,
>;

/// Named match manager implementations.
///
/// The process resolves one name from its configuration at start-up and
/// keeps that manager for its whole lifetime. Integrators add their own
/// implementations with [`MatchManagerRegistry::register`].
#[derive(Clone, Default)]
pub struct MatchManagerRegistry {
    factories: BTreeMap<String, MatchManagerFactory>,
}

impl fmt::Debug for MatchManagerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchManagerRegistry").field("names", &self.names()).finish()
    }
}

fn registry_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl MatchManagerRegistry {
    /// Registry holding the built-in managers:
    ///
    /// - `default` / `fuzzy`: fuzzy names, no cone search
    /// - `exact`: exact names, no cone search
    /// - `fuzzy-cone`: fuzzy names plus a cone search of the configured radius
    /// - `transient`: fuzzy names with `AT`/`SN` prefixes treated as equal
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for kind in ["default", "fuzzy"] {
            registry.register(kind, move |store, _| {
                Ok(Arc::new(TargetMatchManager::new(store).with_kind(kind)))
            });
        }
        registry.register("exact", |store, _| {
            Ok(Arc::new(TargetMatchManager::new(store).with_kind("exact").exact_names()))
        });
        registry.register("fuzzy-cone", |store, config| {
            let manager = TargetMatchManager::new(store)
                .with_kind("fuzzy-cone")
                .with_cone_radius(config.cone_radius_arcsec)?;
            Ok(Arc::new(manager))
        });
        registry.register("transient", |store, _| {
            Ok(Arc::new(
                TargetMatchManager::new(store)
                    .with_kind("transient")
                    .with_normalizer(TransientPrefixNormalizer),
            ))
        });
        registry
    }

    /// Add or replace a named implementation. Names are case-insensitive.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(Arc<dyn TargetStore>, &MatchConfig) -> Result<Arc<dyn MatchManager>, ServiceError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(registry_key(name), Arc::new(factory));
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build the manager named by `config.manager`.
    ///
    /// An unknown name, an invalid configuration, a failing factory or a
    /// built manager reporting an unusable cone radius is an error; there is
    /// no fallback to the default.
    pub fn resolve(
        &self,
        store: Arc<dyn TargetStore>,
        config: &MatchConfig,
    ) -> Result<Arc<dyn MatchManager>, ServiceError> {
        config.validate()?;
        let factory = self.factories.get(&registry_key(&config.manager)).ok_or_else(|| {
            ServiceError::Configuration(format!(
                "unknown match manager '{}' (available: {})",
                config.manager,
                self.names().join(", ")
            ))
        })?;
        let manager = factory(store, config).map_err(|e| {
            ServiceError::Configuration(format!("match manager '{}': {e}", config.manager))
        })?;
        if let Some(radius) = manager.cone_radius_arcsec() {
            validate_radius(radius).map_err(|e| {
                ServiceError::Configuration(format!("match manager '{}': {e}", config.manager))
            })?;
        }
        tracing::info!(
            manager = manager.kind(),
            cone_radius_arcsec = ?manager.cone_radius_arcsec(),
            "Match manager resolved"
        );
        Ok(manager)
    }
}
