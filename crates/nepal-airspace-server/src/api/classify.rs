//! Point and route classification endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;
use nepal_airspace_core::{is_permitted, required_permissions, Classification, Coordinates, ZoneType};

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub waypoints: Vec<Coordinates>,
}

/// Classification summary returned to the planning UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    pub airspace_type: ZoneType,
    pub zone_ids: Vec<String>,
    pub is_permitted: bool,
    pub permissions_required: Vec<String>,
}

impl From<&Classification<'_>> for ClassificationResponse {
    fn from(classification: &Classification<'_>) -> Self {
        Self {
            airspace_type: classification.most_restrictive,
            zone_ids: classification
                .zone_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
            is_permitted: is_permitted(classification.most_restrictive),
            permissions_required: required_permissions(&classification.zone_types()),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.into() })),
    )
}

/// Classify a single point.
pub async fn classify_point(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PointQuery>,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let point = Coordinates::new(query.lat, query.lng);
    if !point.is_valid() {
        return Err(bad_request(format!("coordinates out of range: {}", point)));
    }

    let engine = state.engine();
    let classification = engine.classify(point);
    Ok(Json(ClassificationResponse::from(&classification)))
}

/// Classify every zone a polyline passes through.
pub async fn classify_route(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<ClassificationResponse>, ApiError> {
    if req.waypoints.is_empty() {
        return Err(bad_request("route needs at least one waypoint"));
    }
    if let Some((index, point)) = req
        .waypoints
        .iter()
        .enumerate()
        .find(|(_, point)| !point.is_valid())
    {
        return Err(bad_request(format!(
            "waypoint {} out of range: {}",
            index, point
        )));
    }

    let engine = state.engine();
    let classification = engine.classify_route(&req.waypoints);
    Ok(Json(ClassificationResponse::from(&classification)))
}
