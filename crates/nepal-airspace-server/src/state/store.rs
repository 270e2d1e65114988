//! In-memory state store.

use crate::config::Config;
use nepal_airspace_core::{
    AirspaceEngine, AirspaceZone, Catalog, CatalogError, ClassifierRules,
};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// Application state - the airspace engine shared by all handlers.
///
/// Zones are create-only, so writes are rare and short.
pub struct AppState {
    engine: RwLock<AirspaceEngine>,
}

impl AppState {
    pub fn new(engine: AirspaceEngine) -> Self {
        Self {
            engine: RwLock::new(engine),
        }
    }

    /// Load the configured catalog, or the built-in one when none is set.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let rules = ClassifierRules::default().with_containment(config.containment);
        let engine = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::from_path(path)?;
                tracing::info!(
                    path = %path,
                    zones = catalog.airspaces.len(),
                    regulations = catalog.regulations.len(),
                    "Loaded airspace catalog"
                );
                AirspaceEngine::from_catalog(catalog, rules)?
            }
            None => {
                tracing::info!("Using built-in Nepal airspace catalog");
                AirspaceEngine::with_seed_catalog_and_rules(rules)
            }
        };
        Ok(Self::new(engine))
    }

    /// Read access to the engine.
    pub fn engine(&self) -> RwLockReadGuard<'_, AirspaceEngine> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new zone (create-only).
    pub fn add_zone(&self, zone: AirspaceZone) -> Result<(), CatalogError> {
        let mut engine = self.engine.write().unwrap_or_else(PoisonError::into_inner);
        engine.insert_zone(zone)
    }
}
