//! Reference catalogs: built-in Nepal data and JSON loading.

use crate::error::CatalogError;
use crate::models::{
    AirspaceZone, Coordinates, FlightCondition, Regulation, ZoneGeometry, ZoneType,
};
use crate::regulations::permission_zone_types;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Tribhuvan International Airport reference point.
pub const TRIBHUVAN_AIRPORT: Coordinates = Coordinates::new(27.6966, 85.3591);
const POKHARA_AIRPORT: Coordinates = Coordinates::new(28.2009, 83.9821);
const GAUTAM_BUDDHA_AIRPORT: Coordinates = Coordinates::new(27.5057, 83.4163);

const CAAN_UAS_REQUIREMENTS: &str = "CAAN Unmanned Aircraft System Operation Requirements";
const CAAN_CIVIL_AVIATION_REGULATION: &str = "Civil Aviation Regulation 2058";

/// Zones and regulations as served by the catalog endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "lenient_zones")]
    pub airspaces: Vec<AirspaceZone>,
    #[serde(default)]
    pub regulations: Vec<Regulation>,
}

impl Catalog {
    pub fn seed() -> Self {
        Self {
            airspaces: seed_zones(),
            regulations: seed_regulations(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate_regulations()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject the first regulation that breaks its invariants.
    pub fn validate_regulations(&self) -> Result<(), CatalogError> {
        for regulation in &self.regulations {
            let reasons = regulation.validate();
            if !reasons.is_empty() {
                return Err(CatalogError::InvalidRegulation {
                    id: regulation.id.clone(),
                    reasons,
                });
            }
        }
        Ok(())
    }
}

/// Decode zone records one at a time.
///
/// A record that does not decode (missing geometry fields, unknown type) is
/// skipped with a warning so the rest of the catalog stays usable.
pub fn zones_from_values(values: Vec<Value>) -> Vec<AirspaceZone> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let zone_id = value.get("id").and_then(Value::as_str).map(str::to_string);
            match serde_json::from_value::<AirspaceZone>(value) {
                Ok(zone) => Some(zone),
                Err(err) => {
                    tracing::warn!(index, ?zone_id, %err, "Skipping unreadable zone record");
                    None
                }
            }
        })
        .collect()
}

fn lenient_zones<'de, D>(deserializer: D) -> Result<Vec<AirspaceZone>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer).map(zones_from_values)
}

/// Zone types listed in the permission table that no zone-dependant
/// regulation covers.
pub fn check_consistency(regulations: &[Regulation]) -> Vec<ZoneType> {
    let covered: BTreeSet<ZoneType> = regulations
        .iter()
        .flat_map(|regulation| regulation.gated_zones())
        .collect();
    permission_zone_types()
        .filter(|zone_type| !covered.contains(zone_type))
        .collect()
}

fn circle(id: &str, name: &str, description: &str, zone_type: ZoneType, center: Coordinates, radius: f64) -> AirspaceZone {
    AirspaceZone {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        zone_type,
        geometry: ZoneGeometry::Circle { center, radius },
    }
}

/// Axis-aligned box as a closed ring.
fn rectangle(
    id: &str,
    name: &str,
    description: &str,
    zone_type: ZoneType,
    (north, west): (f64, f64),
    (south, east): (f64, f64),
) -> AirspaceZone {
    let ring = vec![
        Coordinates::new(north, west),
        Coordinates::new(north, east),
        Coordinates::new(south, east),
        Coordinates::new(south, west),
        Coordinates::new(north, west),
    ];
    AirspaceZone {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        zone_type,
        geometry: ZoneGeometry::Polygon {
            coordinates: vec![ring],
        },
    }
}

pub fn seed_zones() -> Vec<AirspaceZone> {
    vec![
        circle(
            "r1",
            "Tribhuvan International Airport",
            "No-fly zone around the runway and approach paths of Kathmandu airport.",
            ZoneType::Restricted,
            TRIBHUVAN_AIRPORT,
            5_000.0,
        ),
        circle(
            "c1",
            "Kathmandu Control Zone",
            "Controlled airspace surrounding Tribhuvan International Airport.",
            ZoneType::Controlled,
            TRIBHUVAN_AIRPORT,
            10_000.0,
        ),
        rectangle(
            "r2",
            "Singha Durbar Government Complex",
            "Government secretariat and parliament area.",
            ZoneType::Restricted,
            (27.7000, 85.3195),
            (27.6945, 85.3270),
        ),
        rectangle(
            "r3",
            "Chhauni Military Barracks",
            "Nepal Army headquarters and barracks.",
            ZoneType::Restricted,
            (27.7080, 85.2930),
            (27.7020, 85.2990),
        ),
        circle(
            "r4",
            "Pokhara International Airport",
            "No-fly zone around Pokhara airport.",
            ZoneType::Restricted,
            POKHARA_AIRPORT,
            5_000.0,
        ),
        circle(
            "c2",
            "Pokhara Control Zone",
            "Controlled airspace surrounding Pokhara International Airport.",
            ZoneType::Controlled,
            POKHARA_AIRPORT,
            10_000.0,
        ),
        circle(
            "r5",
            "Gautam Buddha International Airport",
            "No-fly zone around Bhairahawa airport.",
            ZoneType::Restricted,
            GAUTAM_BUDDHA_AIRPORT,
            5_000.0,
        ),
        circle(
            "c3",
            "Bhairahawa Control Zone",
            "Controlled airspace surrounding Gautam Buddha International Airport.",
            ZoneType::Controlled,
            GAUTAM_BUDDHA_AIRPORT,
            10_000.0,
        ),
        rectangle(
            "a1",
            "Pashupatinath Temple",
            "UNESCO heritage site; flights disturb worshippers and cremation rites.",
            ZoneType::Advisory,
            (27.7150, 85.3440),
            (27.7060, 85.3540),
        ),
        rectangle(
            "a2",
            "Boudhanath Stupa",
            "UNESCO heritage site in a dense residential area.",
            ZoneType::Advisory,
            (27.7250, 85.3580),
            (27.7180, 85.3660),
        ),
        rectangle(
            "a3",
            "Chitwan National Park",
            "Protected wildlife area; park authority approval recommended.",
            ZoneType::Advisory,
            (27.6000, 84.2000),
            (27.4000, 84.6000),
        ),
        rectangle(
            "a4",
            "Sagarmatha National Park",
            "Protected high-altitude area around Everest.",
            ZoneType::Advisory,
            (28.1000, 86.6000),
            (27.8000, 86.9500),
        ),
        rectangle(
            "o1",
            "Sundarijal Hobby Flying Area",
            "Open area commonly used for recreational flying.",
            ZoneType::Open,
            (27.7850, 85.4200),
            (27.7750, 85.4300),
        ),
    ]
}

fn operators(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

fn zones(types: &[ZoneType]) -> Option<BTreeSet<ZoneType>> {
    Some(types.iter().copied().collect())
}

pub fn seed_regulations() -> Vec<Regulation> {
    let everyone = ["recreational", "commercial", "government"];
    vec![
        Regulation {
            id: "registration".to_string(),
            title: "Drone registration".to_string(),
            description: "Drones must be registered with CAA Nepal before operation.".to_string(),
            source: CAAN_UAS_REQUIREMENTS.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: None,
        },
        Regulation {
            id: "vlos".to_string(),
            title: "Visual line of sight".to_string(),
            description: "The pilot must keep the drone within unaided visual line of sight."
                .to_string(),
            source: CAAN_UAS_REQUIREMENTS.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: None,
        },
        Regulation {
            id: "altitude-limit".to_string(),
            title: "Maximum altitude of 120 meters AGL".to_string(),
            description: "Flights above 120 meters above ground level need prior approval."
                .to_string(),
            source: CAAN_UAS_REQUIREMENTS.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: Some(FlightCondition::AltitudeAbove(120.0)),
        },
        Regulation {
            id: "night-operations".to_string(),
            title: "Night operations".to_string(),
            description: "Flights between sunset and sunrise need special permission and lighting."
                .to_string(),
            source: CAAN_UAS_REQUIREMENTS.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: Some(FlightCondition::NightOperation),
        },
        Regulation {
            id: "populated-areas".to_string(),
            title: "Flights over populated areas".to_string(),
            description: "Keep clear of crowds and do not overfly people who are not involved."
                .to_string(),
            source: CAAN_UAS_REQUIREMENTS.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: Some(FlightCondition::OverPopulatedArea),
        },
        Regulation {
            id: "restricted-zones".to_string(),
            title: "Restricted zone authorization".to_string(),
            description: "Flights in restricted zones need special authorization from CAA Nepal and, near military sites, the Nepal Army.".to_string(),
            source: CAAN_CIVIL_AVIATION_REGULATION.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: true,
            applicable_zones: zones(&[ZoneType::Restricted]),
            flight_condition: None,
        },
        Regulation {
            id: "controlled-airspace".to_string(),
            title: "Controlled airspace coordination".to_string(),
            description: "Flights near airports need airport authority permission and a filed flight plan.".to_string(),
            source: CAAN_CIVIL_AVIATION_REGULATION.to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: true,
            applicable_zones: zones(&[ZoneType::Controlled, ZoneType::Restricted]),
            flight_condition: None,
        },
        Regulation {
            id: "heritage-sites".to_string(),
            title: "Heritage and protected sites".to_string(),
            description: "Coordinate with local authorities before flying over heritage sites and national parks.".to_string(),
            source: "Department of Archaeology / DNPWC guidance".to_string(),
            applicable_to: operators(&everyone),
            zone_dependant: true,
            applicable_zones: zones(&[ZoneType::Advisory]),
            flight_condition: None,
        },
        Regulation {
            id: "commercial-permit".to_string(),
            title: "Commercial operator permit".to_string(),
            description: "Commercial operations require an operator permit and third-party insurance.".to_string(),
            source: CAAN_UAS_REQUIREMENTS.to_string(),
            applicable_to: operators(&["commercial"]),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: None,
        },
        Regulation {
            id: "government-coordination".to_string(),
            title: "Government operation notice".to_string(),
            description: "Government operations must notify the Ministry of Home Affairs.".to_string(),
            source: CAAN_CIVIL_AVIATION_REGULATION.to_string(),
            applicable_to: operators(&["government"]),
            zone_dependant: false,
            applicable_zones: None,
            flight_condition: None,
        },
    ]
}
