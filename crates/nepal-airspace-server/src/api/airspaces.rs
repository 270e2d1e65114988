//! Airspace zone API endpoints.
//!
//! Zones are reference data: list, lookup and create-only insertion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::state::AppState;
use nepal_airspace_core::{AirspaceZone, CatalogError, CreateZoneRequest, ZoneType};

#[derive(Debug, Deserialize)]
pub struct ZoneFilter {
    #[serde(rename = "type")]
    pub zone_type: Option<ZoneType>,
}

/// List zones, optionally filtered by type.
pub async fn list_airspaces(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ZoneFilter>,
) -> Json<Vec<AirspaceZone>> {
    let engine = state.engine();
    let registry = engine.registry();
    let zones = match filter.zone_type {
        Some(zone_type) => registry.by_type(zone_type).into_iter().cloned().collect(),
        None => registry.list_all().to_vec(),
    };
    Json(zones)
}

/// Get a specific zone by ID.
pub async fn get_airspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AirspaceZone>, StatusCode> {
    state
        .engine()
        .registry()
        .by_id(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Create a new zone.
pub async fn create_airspace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateZoneRequest>,
) -> Result<(StatusCode, Json<AirspaceZone>), (StatusCode, Json<Value>)> {
    let zone = req.into_zone(|| Uuid::new_v4().to_string());

    match state.add_zone(zone.clone()) {
        Ok(()) => {
            tracing::info!("Created zone '{}' ({}, {})", zone.name, zone.id, zone.zone_type);
            Ok((StatusCode::CREATED, Json(zone)))
        }
        Err(err @ CatalogError::DuplicateZone(_)) => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": err.to_string() })),
        )),
        Err(CatalogError::InvalidZone { id, reasons }) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": format!("zone '{}' is invalid", id),
                "violations": reasons,
            })),
        )),
        Err(err) => {
            tracing::error!(%err, "Failed to create zone");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ))
        }
    }
}
