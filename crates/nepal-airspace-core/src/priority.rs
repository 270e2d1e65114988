//! Most-restrictive-zone policy.

use crate::models::{AirspaceZone, ZoneType};

/// Reduce matched zones to the single most severe type.
///
/// `restricted > controlled > advisory > open`; no zones means `open`.
pub fn resolve<'a>(zones: impl IntoIterator<Item = &'a AirspaceZone>) -> ZoneType {
    resolve_types(zones.into_iter().map(|zone| zone.zone_type))
}

/// Same as [`resolve`] over bare zone types.
pub fn resolve_types(types: impl IntoIterator<Item = ZoneType>) -> ZoneType {
    types.into_iter().max().unwrap_or(ZoneType::Open)
}
