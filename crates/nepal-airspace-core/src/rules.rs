//! Classification rules and thresholds.

use crate::models::ZoneType;

/// How polygon zones are tested for containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainmentStrategy {
    /// Circle around the vertex centroid with a fixed per-type radius
    #[default]
    CentroidRadius,
    /// Exact point-in-polygon; degenerate rings fall back to centroid radius
    RayCasting,
}

impl ContainmentStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "centroid" | "centroid-radius" | "circle" => Some(Self::CentroidRadius),
            "ray-casting" | "raycasting" | "polygon" => Some(Self::RayCasting),
            _ => None,
        }
    }
}

/// Configuration for zone classification.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    pub containment: ContainmentStrategy,
    /// Radius used for restricted polygon zones in meters
    pub restricted_radius_m: f64,
    /// Radius used for controlled polygon zones in meters
    pub controlled_radius_m: f64,
    /// Radius used for advisory polygon zones in meters
    pub advisory_radius_m: f64,
    /// Radius used for open polygon zones in meters
    pub open_radius_m: f64,
    /// Maximum allowed altitude in meters AGL
    pub max_altitude_m: f64,
    /// Spacing of route samples in meters
    pub route_sample_step_m: f64,
    /// Maximum samples per route segment
    pub route_max_samples: usize,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            containment: ContainmentStrategy::default(),
            restricted_radius_m: 3_000.0,
            controlled_radius_m: 5_000.0,
            advisory_radius_m: 4_000.0,
            open_radius_m: 6_000.0,
            max_altitude_m: 120.0, // CAA Nepal ceiling
            route_sample_step_m: 25.0,
            route_max_samples: 200,
        }
    }
}

impl ClassifierRules {
    pub fn with_containment(mut self, containment: ContainmentStrategy) -> Self {
        self.containment = containment;
        self
    }

    /// Fixed radius applied to polygon zones of the given type.
    pub fn polygon_radius_m(&self, zone_type: ZoneType) -> f64 {
        match zone_type {
            ZoneType::Restricted => self.restricted_radius_m,
            ZoneType::Controlled => self.controlled_radius_m,
            ZoneType::Advisory => self.advisory_radius_m,
            ZoneType::Open => self.open_radius_m,
        }
    }
}
