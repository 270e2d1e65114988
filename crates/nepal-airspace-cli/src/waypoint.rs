use nepal_airspace_core::Coordinates;

/// Parse a `lat,lng` pair in decimal degrees.
pub fn parse_waypoint(value: &str) -> Result<Coordinates, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got '{}'", value))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;

    let point = Coordinates::new(lat, lng);
    if !point.is_valid() {
        return Err(format!("coordinates out of range: {}", point));
    }
    Ok(point)
}
