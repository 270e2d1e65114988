//! API routes for the airspace server.

pub mod airspaces;
pub mod classify;
pub mod flight_plans;
pub mod regulations;
pub mod request_id;
mod routes;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
