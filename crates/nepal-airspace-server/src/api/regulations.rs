//! Regulation catalog endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::state::AppState;
use nepal_airspace_core::Regulation;

/// List all regulations in catalog order.
pub async fn list_regulations(State(state): State<Arc<AppState>>) -> Json<Vec<Regulation>> {
    Json(state.engine().regulations().to_vec())
}
