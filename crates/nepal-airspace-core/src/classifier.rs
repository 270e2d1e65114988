//! Containment classifier: which zones contain a point or a route.

use crate::models::{AirspaceZone, Coordinates, ZoneGeometry};
use crate::rules::{ClassifierRules, ContainmentStrategy};
use crate::spatial::{
    distinct_vertices, haversine_distance, point_in_ring, sample_segment, vertex_centroid,
};
use std::collections::HashSet;

/// Test a single zone against a point.
///
/// Returns `None` when the zone geometry is malformed and cannot be tested.
pub fn zone_contains(zone: &AirspaceZone, point: Coordinates, rules: &ClassifierRules) -> Option<bool> {
    if !zone.is_valid() {
        return None;
    }

    match &zone.geometry {
        ZoneGeometry::Circle { center, radius } => Some(haversine_distance(point, *center) <= *radius),
        ZoneGeometry::Polygon { .. } => {
            let ring = zone.geometry.outer_ring()?;
            let use_ray_casting = rules.containment == ContainmentStrategy::RayCasting
                && distinct_vertices(ring) >= 3;
            if use_ray_casting {
                return Some(point_in_ring(point, ring));
            }
            let centroid = vertex_centroid(ring)?;
            Some(haversine_distance(point, centroid) <= rules.polygon_radius_m(zone.zone_type))
        }
    }
}

/// All zones whose geometry contains `point`, in catalog order.
///
/// Malformed zones are skipped with a warning. An empty result means open
/// airspace.
pub fn zones_containing<'a>(
    zones: &'a [AirspaceZone],
    point: Coordinates,
    rules: &ClassifierRules,
) -> Vec<&'a AirspaceZone> {
    if !point.is_valid() {
        tracing::warn!(%point, "Ignoring classification request for invalid coordinates");
        return Vec::new();
    }

    zones
        .iter()
        .filter(|zone| match zone_contains(zone, point, rules) {
            Some(inside) => inside,
            None => {
                tracing::warn!(
                    zone_id = %zone.id,
                    errors = ?zone.validate(),
                    "Skipping zone with malformed geometry"
                );
                false
            }
        })
        .collect()
}

/// Zones touched anywhere along a route, in catalog order.
///
/// Each leg is sampled every `route_sample_step_m`; a single waypoint is
/// classified on its own.
pub fn zones_along_route<'a>(
    zones: &'a [AirspaceZone],
    waypoints: &[Coordinates],
    rules: &ClassifierRules,
) -> Vec<&'a AirspaceZone> {
    let mut samples: Vec<Coordinates> = Vec::new();
    match waypoints {
        [] => return Vec::new(),
        [single] => samples.push(*single),
        _ => {
            for leg in waypoints.windows(2) {
                samples.extend(sample_segment(
                    leg[0],
                    leg[1],
                    rules.route_sample_step_m,
                    rules.route_max_samples,
                ));
            }
        }
    }

    let mut matched: HashSet<&str> = HashSet::new();
    for sample in samples.iter().filter(|p| p.is_valid()) {
        for zone in zones_containing(zones, *sample, rules) {
            matched.insert(zone.id.as_str());
        }
    }

    zones
        .iter()
        .filter(|zone| matched.contains(zone.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZoneType;
    use crate::spatial::offset_by_bearing;

    fn circle(id: &str, center: Coordinates, radius: f64) -> AirspaceZone {
        AirspaceZone {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            zone_type: ZoneType::Controlled,
            geometry: ZoneGeometry::Circle { center, radius },
        }
    }

    /// A long thin rectangle (~11km x ~1km) north-east of Kathmandu.
    fn strip(zone_type: ZoneType) -> AirspaceZone {
        AirspaceZone {
            id: "strip".to_string(),
            name: "Strip".to_string(),
            description: String::new(),
            zone_type,
            geometry: ZoneGeometry::Polygon {
                coordinates: vec![vec![
                    Coordinates::new(27.70, 85.30),
                    Coordinates::new(27.70, 85.41),
                    Coordinates::new(27.71, 85.41),
                    Coordinates::new(27.71, 85.30),
                    Coordinates::new(27.70, 85.30),
                ]],
            },
        }
    }

    #[test]
    fn circle_boundary_is_inclusive() {
        let center = Coordinates::new(27.6966, 85.3591);
        let edge = offset_by_bearing(center, 5_000.0, 0.7);
        let exact = haversine_distance(edge, center);
        let rules = ClassifierRules::default();

        let at_radius = circle("at", center, exact);
        assert_eq!(zone_contains(&at_radius, edge, &rules), Some(true));

        let shrunk = circle("shrunk", center, exact - 0.01);
        assert_eq!(zone_contains(&shrunk, edge, &rules), Some(false));
    }

    #[test]
    fn polygon_uses_type_radius_around_centroid() {
        let rules = ClassifierRules::default();
        let zone = strip(ZoneType::Restricted);
        let ring = zone.geometry.outer_ring().unwrap();
        let centroid = vertex_centroid(ring).unwrap();

        let inside = offset_by_bearing(centroid, 2_900.0, std::f64::consts::PI);
        let outside = offset_by_bearing(centroid, 3_100.0, std::f64::consts::PI);
        assert_eq!(zone_contains(&zone, inside, &rules), Some(true));
        assert_eq!(zone_contains(&zone, outside, &rules), Some(false));

        // Same geometry, open type: 6000m radius.
        let open = strip(ZoneType::Open);
        assert_eq!(zone_contains(&open, outside, &rules), Some(true));
    }

    #[test]
    fn ray_casting_differs_at_polygon_edges() {
        let centroid_rules = ClassifierRules::default();
        let exact_rules =
            ClassifierRules::default().with_containment(ContainmentStrategy::RayCasting);
        let zone = strip(ZoneType::Restricted);

        // Far east end of the strip: inside the polygon, beyond the 3km circle.
        let east_end = Coordinates::new(27.705, 85.405);
        assert_eq!(zone_contains(&zone, east_end, &centroid_rules), Some(false));
        assert_eq!(zone_contains(&zone, east_end, &exact_rules), Some(true));

        // Just south of the strip: outside the polygon, inside the circle.
        let south = Coordinates::new(27.695, 85.34);
        assert_eq!(zone_contains(&zone, south, &centroid_rules), Some(true));
        assert_eq!(zone_contains(&zone, south, &exact_rules), Some(false));
    }

    #[test]
    fn degenerate_ring_falls_back_to_centroid() {
        let rules = ClassifierRules::default().with_containment(ContainmentStrategy::RayCasting);
        let p = Coordinates::new(27.70, 85.30);
        let zone = AirspaceZone {
            geometry: ZoneGeometry::Polygon {
                coordinates: vec![vec![p, p, p]],
            },
            ..strip(ZoneType::Advisory)
        };
        assert_eq!(zone_contains(&zone, offset_by_bearing(p, 3_000.0, 0.0), &rules), Some(true));
    }

    #[test]
    fn malformed_zone_is_skipped() {
        let rules = ClassifierRules::default();
        let p = Coordinates::new(27.70, 85.30);
        let zones = vec![
            circle("broken", Coordinates::new(127.0, 85.30), 1_000.0),
            circle("good", p, 1_000.0),
        ];
        assert_eq!(zone_contains(&zones[0], p, &rules), None);
        let hits = zones_containing(&zones, p, &rules);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "good");
    }

    #[test]
    fn invalid_point_matches_nothing() {
        let rules = ClassifierRules::default();
        let zones = vec![circle("a", Coordinates::new(27.7, 85.3), 1_000_000.0)];
        assert!(zones_containing(&zones, Coordinates::new(f64::NAN, 85.3), &rules).is_empty());
    }

    #[test]
    fn route_picks_up_zones_between_waypoints() {
        let rules = ClassifierRules::default();
        let zones = vec![
            circle("west", Coordinates::new(27.70, 85.20), 500.0),
            circle("middle", Coordinates::new(27.70, 85.25), 500.0),
            circle("elsewhere", Coordinates::new(28.20, 83.98), 500.0),
        ];
        let route = [Coordinates::new(27.70, 85.19), Coordinates::new(27.70, 85.30)];

        let ids: Vec<&str> = zones_along_route(&zones, &route, &rules)
            .iter()
            .map(|z| z.id.as_str())
            .collect();
        assert_eq!(ids, ["west", "middle"]);

        // Endpoints alone miss the middle zone.
        let endpoint_hits: usize = route
            .iter()
            .map(|p| zones_containing(&zones, *p, &rules).len())
            .sum();
        assert_eq!(endpoint_hits, 0);
        assert!(zones_along_route(&zones, &[], &rules).is_empty());
    }
}
