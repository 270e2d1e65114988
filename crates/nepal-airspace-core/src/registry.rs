//! Zone registry: the fixed catalog of airspace zones.

use crate::error::CatalogError;
use crate::models::{AirspaceZone, ZoneType};
use std::collections::HashMap;

/// Holds airspace zones in insertion order with an id index.
///
/// Zones are create-only: there is no update or delete.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<AirspaceZone>,
    index: HashMap<String, usize>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from reference data.
    ///
    /// Malformed zones are kept (the classifier skips them); duplicate ids
    /// are rejected.
    pub fn from_zones(zones: impl IntoIterator<Item = AirspaceZone>) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for zone in zones {
            if !zone.is_valid() {
                tracing::warn!(
                    zone_id = %zone.id,
                    errors = ?zone.validate(),
                    "Loaded malformed zone; it will be skipped during classification"
                );
            }
            registry.push(zone)?;
        }
        Ok(registry)
    }

    /// Add a new zone through the admin path.
    ///
    /// Unlike [`ZoneRegistry::from_zones`], malformed geometry is rejected.
    pub fn insert(&mut self, zone: AirspaceZone) -> Result<(), CatalogError> {
        let reasons = zone.validate();
        if !reasons.is_empty() {
            return Err(CatalogError::InvalidZone { id: zone.id, reasons });
        }
        self.push(zone)
    }

    fn push(&mut self, zone: AirspaceZone) -> Result<(), CatalogError> {
        if self.index.contains_key(&zone.id) {
            return Err(CatalogError::DuplicateZone(zone.id));
        }
        self.index.insert(zone.id.clone(), self.zones.len());
        self.zones.push(zone);
        Ok(())
    }

    pub fn list_all(&self) -> &[AirspaceZone] {
        &self.zones
    }

    pub fn by_type(&self, zone_type: ZoneType) -> Vec<&AirspaceZone> {
        self.zones
            .iter()
            .filter(|zone| zone.zone_type == zone_type)
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&AirspaceZone> {
        self.index.get(id).and_then(|&i| self.zones.get(i))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
