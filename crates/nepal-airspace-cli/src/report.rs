//! Plain-text rendering for terminal output.

use nepal_airspace_core::{
    is_permitted, required_permissions, AirspaceZone, Classification, FlightResults,
    ZoneGeometry, ZoneType,
};
use std::fmt::Write;

fn describe_geometry(geometry: &ZoneGeometry) -> String {
    match geometry {
        ZoneGeometry::Circle { center, radius } => format!("circle {:.0} m at {}", radius, center),
        ZoneGeometry::Polygon { coordinates } => {
            let vertices = coordinates.first().map_or(0, Vec::len);
            format!("polygon, {} vertices", vertices)
        }
    }
}

pub fn zone_table(zones: &[&AirspaceZone]) -> String {
    let mut out = String::new();
    for zone in zones {
        let _ = writeln!(
            out,
            "{:<12} {:<11} {:<40} {}",
            zone.id,
            zone.zone_type,
            zone.name,
            describe_geometry(&zone.geometry)
        );
    }
    let _ = writeln!(out, "{} zone(s)", zones.len());
    out
}

pub fn classification(classification: &Classification<'_>) -> String {
    let mut out = String::new();
    let most_restrictive = classification.most_restrictive;
    let _ = writeln!(out, "Airspace: {}", most_restrictive);

    if classification.zones.is_empty() {
        let _ = writeln!(out, "No catalogued zones at this location.");
    } else {
        let _ = writeln!(out, "Zones:");
        for zone in &classification.zones {
            let _ = writeln!(out, "  - {} [{}] {}", zone.id, zone.zone_type, zone.name);
        }
    }

    let verdict = if is_permitted(most_restrictive) {
        "permitted"
    } else {
        "NOT permitted"
    };
    let _ = writeln!(out, "Flight: {}", verdict);
    push_list(
        &mut out,
        "Permissions required",
        &required_permissions(&classification.zone_types()),
    );
    out
}

pub fn flight_results(airspace_type: Option<ZoneType>, results: &FlightResults) -> String {
    let mut out = String::new();
    if let Some(airspace_type) = airspace_type {
        let _ = writeln!(out, "Airspace: {}", airspace_type);
    }
    let verdict = if results.is_permitted {
        "permitted"
    } else {
        "NOT permitted"
    };
    let _ = writeln!(out, "Flight: {}", verdict);
    push_list(&mut out, "Permissions required", &results.permissions_required);
    push_list(&mut out, "Applicable regulations", &results.regulations_applicable);
    push_list(&mut out, "Advisories", &results.advisory_messages);
    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", heading);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}
