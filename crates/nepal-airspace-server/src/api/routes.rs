//! REST API routes.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{airspaces, classify, flight_plans, regulations, request_id};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    // Catalog routes consumed by the planning UI.
    // POST is the create-only admin path; there is no update or delete.
    let catalog_routes = Router::new()
        .route(
            "/api/airspaces",
            get(airspaces::list_airspaces).post(airspaces::create_airspace),
        )
        .route("/api/airspaces/:id", get(airspaces::get_airspace))
        .route("/api/regulations", get(regulations::list_regulations));

    let evaluation_routes = Router::new()
        .route("/api/classify", get(classify::classify_point))
        .route("/api/classify/route", post(classify::classify_route))
        .route(
            "/api/flight-plans/evaluate",
            post(flight_plans::evaluate_flight_plan),
        );

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(catalog_routes)
        .merge(evaluation_routes)
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
