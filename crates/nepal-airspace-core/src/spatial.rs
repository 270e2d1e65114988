//! Spatial math for zone containment and distance calculations.

use crate::models::Coordinates;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// This is the standard formula for calculating great-circle distance
/// between two points on a sphere given their latitudes and longitudes.
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Arithmetic mean of a ring's vertices.
///
/// Not area-weighted. Returns `None` for an empty ring.
pub fn vertex_centroid(ring: &[Coordinates]) -> Option<Coordinates> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (lat_sum, lng_sum) = ring
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(Coordinates::new(lat_sum / n, lng_sum / n))
}

/// Number of distinct vertices in a ring (closing duplicate ignored).
pub fn distinct_vertices(ring: &[Coordinates]) -> usize {
    let mut seen: Vec<Coordinates> = Vec::with_capacity(ring.len());
    for point in ring {
        if !seen.iter().any(|p| p == point) {
            seen.push(*point);
        }
    }
    seen.len()
}

/// Check if a point is inside a ring using ray casting.
///
/// Works for open and closed rings; the closing edge is implied.
pub fn point_in_ring(point: Coordinates, ring: &[Coordinates]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    // Ray casting: count intersections with polygon edges
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (yi, xi) = (ring[i].lat, ring[i].lng);
        let (yj, xj) = (ring[j].lat, ring[j].lng);

        if ((yi > point.lat) != (yj > point.lat))
            && (point.lng < (xj - xi) * (point.lat - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Offset a position by distance and bearing.
///
/// # Arguments
/// * `origin` - Starting position in degrees
/// * `distance_m` - Distance in meters
/// * `bearing_rad` - Bearing in radians (0 = north, π/2 = east)
pub fn offset_by_bearing(origin: Coordinates, distance_m: f64, bearing_rad: f64) -> Coordinates {
    if distance_m.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lng.to_radians();
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    Coordinates::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Sample points along a segment, endpoints included.
///
/// Spacing is roughly `step_m`, capped at `max_steps` intervals.
pub fn sample_segment(
    start: Coordinates,
    end: Coordinates,
    step_m: f64,
    max_steps: usize,
) -> Vec<Coordinates> {
    let distance_m = haversine_distance(start, end);
    let step_m = if step_m.is_finite() && step_m > 0.0 { step_m } else { distance_m.max(1.0) };
    let steps = ((distance_m / step_m).ceil() as usize).clamp(1, max_steps.max(1));

    (0..=steps)
        .map(|i| {
            if i == steps {
                return end;
            }
            let t = i as f64 / steps as f64;
            Coordinates::new(
                start.lat + t * (end.lat - start.lat),
                start.lng + t * (end.lng - start.lng),
            )
        })
        .collect()
}
