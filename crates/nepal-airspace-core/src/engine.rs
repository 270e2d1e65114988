//! Airspace engine: registry, regulation catalog and rules behind one handle.

use crate::catalog::{check_consistency, Catalog};
use crate::classifier::{zones_along_route, zones_containing};
use crate::error::CatalogError;
use crate::models::{AirspaceZone, Coordinates, Regulation, ZoneType};
use crate::priority;
use crate::registry::ZoneRegistry;
use crate::regulations::{
    advisory_messages, applicable_regulations, is_permitted, required_permissions,
    FlightParameters,
};
use crate::rules::ClassifierRules;
use crate::wizard::{FlightPlan, FlightResults};
use serde::Serialize;
use std::collections::BTreeSet;

/// Zones matched at a point or along a route.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification<'a> {
    pub zones: Vec<&'a AirspaceZone>,
    pub most_restrictive: ZoneType,
}

impl Classification<'_> {
    pub fn zone_types(&self) -> BTreeSet<ZoneType> {
        self.zones.iter().map(|zone| zone.zone_type).collect()
    }

    pub fn zone_ids(&self) -> Vec<&str> {
        self.zones.iter().map(|zone| zone.id.as_str()).collect()
    }
}

/// Complete input for an evaluation.
#[derive(Debug, Clone)]
pub struct FlightProfile<'a> {
    pub operator_type: &'a str,
    pub drone_weight: Option<&'a str>,
    pub coordinates: Coordinates,
    pub params: FlightParameters,
}

impl<'a> FlightProfile<'a> {
    /// Only available when intent, location and flight are all complete.
    pub fn from_plan(plan: &'a FlightPlan) -> Option<Self> {
        let intent = plan.intent.as_ref().filter(|intent| intent.is_complete())?;
        let location = plan.location.as_ref().filter(|location| location.is_complete())?;
        let flight = plan.flight.as_ref().filter(|flight| flight.is_complete())?;

        Some(Self {
            operator_type: intent.drone_pilot_type.as_deref()?,
            drone_weight: intent.drone_weight.as_deref(),
            coordinates: location.coordinates?,
            params: FlightParameters {
                altitude: flight.altitude?,
                is_night_operation: flight.is_night_operation,
                is_over_populated_area: location.is_over_populated_area(),
            },
        })
    }
}

/// Owns the reference catalogs and classification rules.
#[derive(Debug, Clone)]
pub struct AirspaceEngine {
    registry: ZoneRegistry,
    regulations: Vec<Regulation>,
    rules: ClassifierRules,
}

impl AirspaceEngine {
    pub fn new(registry: ZoneRegistry, regulations: Vec<Regulation>, rules: ClassifierRules) -> Self {
        let uncovered = check_consistency(&regulations);
        if !uncovered.is_empty() {
            tracing::warn!(
                zone_types = ?uncovered,
                "Permission table lists zone types with no zone-dependant regulation"
            );
        }
        Self {
            registry,
            regulations,
            rules,
        }
    }

    /// Engine over a validated catalog.
    pub fn from_catalog(catalog: Catalog, rules: ClassifierRules) -> Result<Self, CatalogError> {
        catalog.validate_regulations()?;
        let registry = ZoneRegistry::from_zones(catalog.airspaces)?;
        Ok(Self::new(registry, catalog.regulations, rules))
    }

    /// Engine over the built-in Nepal reference data.
    pub fn with_seed_catalog() -> Self {
        Self::with_seed_catalog_and_rules(ClassifierRules::default())
    }

    pub fn with_seed_catalog_and_rules(rules: ClassifierRules) -> Self {
        let catalog = Catalog::seed();
        let mut registry = ZoneRegistry::new();
        for zone in catalog.airspaces {
            // Seed ids are unique and geometry valid; see catalog tests.
            if let Err(err) = registry.insert(zone) {
                tracing::warn!(%err, "Skipping seed zone");
            }
        }
        Self::new(registry, catalog.regulations, rules)
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn regulations(&self) -> &[Regulation] {
        &self.regulations
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Create-only zone insertion.
    pub fn insert_zone(&mut self, zone: AirspaceZone) -> Result<(), CatalogError> {
        self.registry.insert(zone)
    }

    pub fn classify(&self, point: Coordinates) -> Classification<'_> {
        let zones = zones_containing(self.registry.list_all(), point, &self.rules);
        let most_restrictive = priority::resolve(zones.iter().copied());
        tracing::debug!(%point, matched = zones.len(), %most_restrictive, "Classified point");
        Classification {
            zones,
            most_restrictive,
        }
    }

    pub fn classify_route(&self, waypoints: &[Coordinates]) -> Classification<'_> {
        let zones = zones_along_route(self.registry.list_all(), waypoints, &self.rules);
        let most_restrictive = priority::resolve(zones.iter().copied());
        tracing::debug!(
            waypoints = waypoints.len(),
            matched = zones.len(),
            %most_restrictive,
            "Classified route"
        );
        Classification {
            zones,
            most_restrictive,
        }
    }

    /// Regulations, permissions and advisories for a complete profile.
    ///
    /// Classification is recomputed from the coordinates.
    pub fn evaluate(&self, profile: &FlightProfile<'_>) -> FlightResults {
        let classification = self.classify(profile.coordinates);
        let zone_types = classification.zone_types();
        let most_restrictive = classification.most_restrictive;

        let regulations_applicable = applicable_regulations(
            &self.regulations,
            profile.operator_type,
            &zone_types,
            &profile.params,
        )
        .into_iter()
        .map(|regulation| regulation.title.clone())
        .collect();

        FlightResults {
            is_permitted: is_permitted(most_restrictive),
            permissions_required: required_permissions(&zone_types),
            regulations_applicable,
            advisory_messages: advisory_messages(
                &profile.params,
                most_restrictive,
                profile.drone_weight,
                self.rules.max_altitude_m,
            ),
        }
    }
}

impl Default for AirspaceEngine {
    fn default() -> Self {
        Self::with_seed_catalog()
    }
}
