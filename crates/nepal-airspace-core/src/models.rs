//! Core data models for airspace zones and regulations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside lat [-90, 90], lng [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Airspace classification, ordered by flight-restriction strength.
///
/// Variant order is significant: `Open < Advisory < Controlled < Restricted`,
/// so `Iterator::max` yields the most restrictive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// No specific restriction
    Open,
    /// Caution advised (heritage sites, protected areas)
    Advisory,
    /// Coordination with an authority required
    Controlled,
    /// Flights prohibited without special authorization
    Restricted,
}

impl ZoneType {
    /// All zone types, most severe first.
    pub const BY_SEVERITY: [ZoneType; 4] = [
        ZoneType::Restricted,
        ZoneType::Controlled,
        ZoneType::Advisory,
        ZoneType::Open,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restricted => "restricted",
            Self::Controlled => "controlled",
            Self::Advisory => "advisory",
            Self::Open => "open",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "restricted" => Some(Self::Restricted),
            "controlled" => Some(Self::Controlled),
            "advisory" => Some(Self::Advisory),
            "open" => Some(Self::Open),
            _ => None,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of an airspace zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ZoneGeometry {
    Circle {
        center: Coordinates,
        /// Radius in meters
        radius: f64,
    },
    Polygon {
        /// Rings of vertices; the first ring is the outer boundary.
        coordinates: Vec<Vec<Coordinates>>,
    },
}

impl ZoneGeometry {
    /// Outer boundary of a polygon, `None` for circles.
    pub fn outer_ring(&self) -> Option<&[Coordinates]> {
        match self {
            Self::Circle { .. } => None,
            Self::Polygon { coordinates } => coordinates.first().map(Vec::as_slice),
        }
    }
}

/// An airspace zone from the reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirspaceZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub geometry: ZoneGeometry,
}

impl AirspaceZone {
    /// Validate zone geometry.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push("Zone id must not be empty".to_string());
        }

        match &self.geometry {
            ZoneGeometry::Circle { center, radius } => {
                if !center.is_valid() {
                    errors.push(format!("Circle center {} is out of range", center));
                }
                if !radius.is_finite() || *radius <= 0.0 {
                    errors.push(format!("Circle radius ({}) must be positive", radius));
                }
            }
            ZoneGeometry::Polygon { coordinates } => match coordinates.first() {
                None => errors.push("Polygon has no rings".to_string()),
                Some(ring) => {
                    if ring.len() < 3 {
                        errors.push("Polygon must have at least 3 vertices".to_string());
                    }
                    if let Some(bad) = ring.iter().find(|point| !point.is_valid()) {
                        errors.push(format!("Polygon vertex {} is out of range", bad));
                    }
                }
            },
        }

        errors
    }

    /// Check if zone is usable for classification.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Whether the outer ring is closed (first vertex equals last).
    /// Circles are always closed.
    pub fn is_closed(&self) -> bool {
        match self.geometry.outer_ring() {
            None => true,
            Some(ring) => match (ring.first(), ring.last()) {
                (Some(first), Some(last)) => {
                    (first.lat - last.lat).abs() <= 1e-9 && (first.lng - last.lng).abs() <= 1e-9
                }
                _ => false,
            },
        }
    }
}

/// Request to create a new zone through the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    /// Optional caller-chosen identifier; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub geometry: ZoneGeometry,
}

impl CreateZoneRequest {
    pub fn into_zone(self, generated_id: impl FnOnce() -> String) -> AirspaceZone {
        AirspaceZone {
            id: self.id.unwrap_or_else(generated_id),
            name: self.name,
            description: self.description,
            zone_type: self.zone_type,
            geometry: self.geometry,
        }
    }
}

/// Flight parameter a regulation is additionally gated on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightCondition {
    /// Applies only when the planned altitude exceeds the given meters AGL
    AltitudeAbove(f64),
    /// Applies only to night operations
    NightOperation,
    /// Applies only over populated areas
    OverPopulatedArea,
}

/// A regulation from the reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regulation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Citation for the rule
    #[serde(default)]
    pub source: String,
    /// Operator types this regulation applies to (recreational, commercial, ...)
    pub applicable_to: BTreeSet<String>,
    #[serde(default)]
    pub zone_dependant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_zones: Option<BTreeSet<ZoneType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_condition: Option<FlightCondition>,
}

impl Regulation {
    /// Validate the regulation record.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() {
            errors.push("Regulation id must not be empty".to_string());
        }
        if self.applicable_to.is_empty() {
            errors.push("Regulation must apply to at least one operator type".to_string());
        }
        if self.zone_dependant
            && self
                .applicable_zones
                .as_ref()
                .map_or(true, BTreeSet::is_empty)
        {
            errors.push("Zone-dependant regulation must list applicable zones".to_string());
        }
        errors
    }

    /// Whether the operator type is listed (trimmed, case-insensitive).
    pub fn applies_to_operator(&self, operator_type: &str) -> bool {
        let operator_type = operator_type.trim();
        self.applicable_to
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(operator_type))
    }

    /// Zone types this regulation is gated on (empty when not zone-dependant).
    pub fn gated_zones(&self) -> impl Iterator<Item = ZoneType> + '_ {
        self.applicable_zones
            .iter()
            .flatten()
            .copied()
            .filter(move |_| self.zone_dependant)
    }
}
