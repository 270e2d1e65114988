//! Regulation resolution, permission policy and advisory messages.

use crate::models::{FlightCondition, Regulation, ZoneType};
use std::collections::BTreeSet;

/// Drone weight class that triggers the registration advisory.
pub const HEAVY_DRONE_WEIGHT: &str = "Over 2kg";

pub const NIGHT_OPERATION_MESSAGE: &str =
    "Night operations require special permission from CAA Nepal and appropriate drone lighting.";
pub const RESTRICTED_ZONE_MESSAGE: &str =
    "Your location is in a restricted zone. Flights are prohibited without special authorization.";
pub const CONTROLLED_ZONE_MESSAGE: &str =
    "Your location is in controlled airspace. Coordinate with the airport authority before flying.";
pub const ADVISORY_ZONE_MESSAGE: &str =
    "Your location is in an advisory zone. Exercise caution and follow local guidance.";
pub const HEAVY_DRONE_MESSAGE: &str = "Drones over 2kg must be registered with CAA Nepal.";

/// Permission requirements per zone type, most severe first.
///
/// Kept by hand alongside the regulation catalog; see
/// [`crate::catalog::check_consistency`].
const PERMISSION_TABLE: [(ZoneType, &[&str]); 3] = [
    (
        ZoneType::Restricted,
        &[
            "Special authorization from CAA Nepal",
            "Military clearance (for military zones)",
        ],
    ),
    (
        ZoneType::Controlled,
        &[
            "Permission from airport authority",
            "Flight plan submission to CAA Nepal",
        ],
    ),
    (
        ZoneType::Advisory,
        &["Coordination with local authorities (heritage/protected sites)"],
    ),
];

/// Flight parameters that gate individual regulations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightParameters {
    /// Planned altitude in meters AGL
    pub altitude: f64,
    pub is_night_operation: bool,
    pub is_over_populated_area: bool,
}

impl FlightParameters {
    fn satisfies(&self, condition: FlightCondition) -> bool {
        match condition {
            FlightCondition::AltitudeAbove(limit_m) => self.altitude > limit_m,
            FlightCondition::NightOperation => self.is_night_operation,
            FlightCondition::OverPopulatedArea => self.is_over_populated_area,
        }
    }
}

/// Regulations that apply to an operator in the given zones, in catalog order.
///
/// A regulation applies when the operator is listed, its zone gate (if
/// zone-dependant) intersects `zone_types`, and its flight condition (if
/// any) holds.
pub fn applicable_regulations<'a>(
    regulations: &'a [Regulation],
    operator_type: &str,
    zone_types: &BTreeSet<ZoneType>,
    params: &FlightParameters,
) -> Vec<&'a Regulation> {
    regulations
        .iter()
        .filter(|regulation| regulation.applies_to_operator(operator_type))
        .filter(|regulation| {
            !regulation.zone_dependant
                || regulation.gated_zones().any(|zone_type| zone_types.contains(&zone_type))
        })
        .filter(|regulation| {
            regulation
                .flight_condition
                .map_or(true, |condition| params.satisfies(condition))
        })
        .collect()
}

/// Whether flights are permitted at all in the most restrictive zone.
pub fn is_permitted(most_restrictive: ZoneType) -> bool {
    match most_restrictive {
        ZoneType::Restricted => false,
        ZoneType::Controlled | ZoneType::Advisory | ZoneType::Open => true,
    }
}

/// Fixed permission requirements for the matched zone types.
///
/// Restricted items come first, then controlled, then advisory.
pub fn required_permissions(zone_types: &BTreeSet<ZoneType>) -> Vec<String> {
    PERMISSION_TABLE
        .iter()
        .filter(|(zone_type, _)| zone_types.contains(zone_type))
        .flat_map(|(_, items)| items.iter().map(|item| item.to_string()))
        .collect()
}

/// Zone types that carry entries in the permission table.
pub fn permission_zone_types() -> impl Iterator<Item = ZoneType> {
    PERMISSION_TABLE.iter().map(|(zone_type, _)| *zone_type)
}

/// Human-readable advisories, in fixed order.
pub fn advisory_messages(
    params: &FlightParameters,
    most_restrictive: ZoneType,
    drone_weight: Option<&str>,
    max_altitude_m: f64,
) -> Vec<String> {
    let mut messages = Vec::new();

    if params.altitude > max_altitude_m {
        messages.push(format!(
            "Your planned altitude exceeds the maximum allowed limit of {} meters.",
            max_altitude_m
        ));
    }

    if params.is_night_operation {
        messages.push(NIGHT_OPERATION_MESSAGE.to_string());
    }

    match most_restrictive {
        ZoneType::Restricted => messages.push(RESTRICTED_ZONE_MESSAGE.to_string()),
        ZoneType::Controlled => messages.push(CONTROLLED_ZONE_MESSAGE.to_string()),
        ZoneType::Advisory => messages.push(ADVISORY_ZONE_MESSAGE.to_string()),
        ZoneType::Open => {}
    }

    if drone_weight.is_some_and(|weight| weight.trim().eq_ignore_ascii_case(HEAVY_DRONE_WEIGHT)) {
        messages.push(HEAVY_DRONE_MESSAGE.to_string());
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_regulations;

    const ALTITUDE_MESSAGE: &str =
        "Your planned altitude exceeds the maximum allowed limit of 120 meters.";

    fn types(list: &[ZoneType]) -> BTreeSet<ZoneType> {
        list.iter().copied().collect()
    }

    fn regulation(id: &str, zone_dependant: bool, zones: &[ZoneType]) -> Regulation {
        Regulation {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            source: String::new(),
            applicable_to: ["recreational", "commercial", "government"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            zone_dependant,
            applicable_zones: (!zones.is_empty()).then(|| types(zones)),
            flight_condition: None,
        }
    }

    #[test]
    fn restricted_only_regulation_never_applies_in_open_airspace() {
        let regulations = vec![
            regulation("restricted-only", true, &[ZoneType::Restricted]),
            regulation("general", false, &[]),
        ];
        let params_grid = [
            FlightParameters::default(),
            FlightParameters { altitude: 500.0, is_night_operation: true, is_over_populated_area: true },
        ];
        for op in ["recreational", "commercial", "government", "unknown"] {
            for params in &params_grid {
                let ids: Vec<&str> =
                    applicable_regulations(&regulations, op, &types(&[ZoneType::Open]), params)
                        .iter()
                        .map(|r| r.id.as_str())
                        .collect();
                assert!(!ids.contains(&"restricted-only"), "{op}: {ids:?}");
            }
        }
    }

    #[test]
    fn zone_gate_matches_any_overlap() {
        let regulations = vec![regulation("ctr", true, &[ZoneType::Controlled, ZoneType::Restricted])];
        let hit = applicable_regulations(
            &regulations,
            "commercial",
            &types(&[ZoneType::Advisory, ZoneType::Controlled]),
            &FlightParameters::default(),
        );
        assert_eq!(hit.len(), 1);
    }

    #[test]
    fn operator_type_must_be_listed() {
        let mut only_commercial = regulation("c", false, &[]);
        only_commercial.applicable_to = ["commercial".to_string()].into_iter().collect();
        let regulations = vec![only_commercial];
        let params = FlightParameters::default();
        assert!(applicable_regulations(&regulations, "recreational", &BTreeSet::new(), &params).is_empty());
        assert_eq!(applicable_regulations(&regulations, "Commercial", &BTreeSet::new(), &params).len(), 1);
    }

    #[test]
    fn flight_conditions_gate_seeded_regulations() {
        let regulations = seed_regulations();
        let zones = types(&[ZoneType::Open]);
        let ids = |params: FlightParameters| -> Vec<String> {
            applicable_regulations(&regulations, "recreational", &zones, &params)
                .iter()
                .map(|r| r.id.clone())
                .collect()
        };

        let calm = ids(FlightParameters { altitude: 100.0, ..Default::default() });
        assert!(!calm.iter().any(|id| id == "altitude-limit"));
        assert!(!calm.iter().any(|id| id == "night-operations"));
        assert!(!calm.iter().any(|id| id == "populated-areas"));

        let boundary = ids(FlightParameters { altitude: 120.0, ..Default::default() });
        assert!(!boundary.iter().any(|id| id == "altitude-limit"));

        let busy = ids(FlightParameters {
            altitude: 150.0,
            is_night_operation: true,
            is_over_populated_area: true,
        });
        assert!(busy.iter().any(|id| id == "altitude-limit"));
        assert!(busy.iter().any(|id| id == "night-operations"));
        assert!(busy.iter().any(|id| id == "populated-areas"));
    }

    #[test]
    fn only_restricted_is_denied() {
        assert!(!is_permitted(ZoneType::Restricted));
        assert!(is_permitted(ZoneType::Controlled));
        assert!(is_permitted(ZoneType::Advisory));
        assert!(is_permitted(ZoneType::Open));
    }

    #[test]
    fn permissions_follow_severity_order() {
        let all = required_permissions(&types(&[ZoneType::Advisory, ZoneType::Restricted, ZoneType::Controlled]));
        assert_eq!(
            all,
            [
                "Special authorization from CAA Nepal",
                "Military clearance (for military zones)",
                "Permission from airport authority",
                "Flight plan submission to CAA Nepal",
                "Coordination with local authorities (heritage/protected sites)",
            ]
        );
        assert!(required_permissions(&types(&[ZoneType::Open])).is_empty());
        assert!(required_permissions(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn altitude_message_appears_once() {
        for zone_type in ZoneType::BY_SEVERITY {
            let params = FlightParameters { altitude: 150.0, ..Default::default() };
            let messages = advisory_messages(&params, zone_type, None, 120.0);
            assert_eq!(messages.iter().filter(|m| *m == ALTITUDE_MESSAGE).count(), 1);
        }
    }

    #[test]
    fn heavy_drone_message_is_location_independent() {
        for zone_type in ZoneType::BY_SEVERITY {
            let messages =
                advisory_messages(&FlightParameters::default(), zone_type, Some(HEAVY_DRONE_WEIGHT), 120.0);
            assert!(messages.iter().any(|m| m == HEAVY_DRONE_MESSAGE));
        }
        let light = advisory_messages(&FlightParameters::default(), ZoneType::Open, Some("Under 250g"), 120.0);
        assert!(light.is_empty());
    }

    #[test]
    fn messages_keep_fixed_order() {
        let params = FlightParameters { altitude: 200.0, is_night_operation: true, is_over_populated_area: false };
        let messages = advisory_messages(&params, ZoneType::Controlled, Some("Over 2kg"), 120.0);
        assert_eq!(
            messages,
            [
                ALTITUDE_MESSAGE,
                NIGHT_OPERATION_MESSAGE,
                CONTROLLED_ZONE_MESSAGE,
                HEAVY_DRONE_MESSAGE,
            ]
        );
    }
}
