//! Flight plan evaluation endpoint.
//!
//! Stateless: the client posts the wizard sections it has collected and
//! receives the step 4 results. Nothing is stored server side.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;
use nepal_airspace_core::{FlightPlan, FlightPlanInput, FlightResults, Step, ZoneType};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub airspace_type: Option<ZoneType>,
    pub results: FlightResults,
}

/// Evaluate a complete flight plan.
pub async fn evaluate_flight_plan(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FlightPlanInput>,
) -> Result<Json<EvaluationResponse>, (StatusCode, Json<Value>)> {
    let engine = state.engine();
    let mut plan = FlightPlan::from_input(input, &engine);

    let Some(results) = plan.compute_results(&engine).cloned() else {
        let missing: Vec<u8> = [Step::Intent, Step::Location, Step::Flight]
            .into_iter()
            .filter(|step| !plan.is_step_complete(*step))
            .map(Step::number)
            .collect();
        tracing::debug!(?missing, "Rejected incomplete flight plan");
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "flight plan is incomplete",
                "incompleteSteps": missing,
            })),
        ));
    };

    let airspace_type = plan.location.as_ref().and_then(|location| location.airspace_type);
    tracing::info!(
        airspace_type = ?airspace_type,
        permitted = results.is_permitted,
        "Evaluated flight plan"
    );

    Ok(Json(EvaluationResponse {
        airspace_type,
        results,
    }))
}
