//! Four-step flight plan wizard: Intent, Location, Flight, Results.
//!
//! The plan is an explicit value owned by the caller. Derived fields
//! (`Location::airspace_type`, results) are only written through explicit
//! calls that take the engine.

use crate::engine::{AirspaceEngine, FlightProfile};
use crate::error::WizardError;
use crate::models::{Coordinates, ZoneType};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wizard position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    #[default]
    Intent = 1,
    Location = 2,
    Flight = 3,
    Results = 4,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn following(self) -> Option<Self> {
        match self {
            Self::Intent => Some(Self::Location),
            Self::Location => Some(Self::Flight),
            Self::Flight => Some(Self::Results),
            Self::Results => None,
        }
    }

    fn preceding(self) -> Option<Self> {
        match self {
            Self::Intent => None,
            Self::Location => Some(Self::Intent),
            Self::Flight => Some(Self::Location),
            Self::Results => Some(Self::Flight),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = WizardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Intent),
            2 => Ok(Self::Location),
            3 => Ok(Self::Flight),
            4 => Ok(Self::Results),
            other => Err(WizardError::StepOutOfRange(other)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Step 1: what the flight is for and who flies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightIntent {
    #[serde(default)]
    pub purpose: Option<String>,
    /// Operator type: recreational, commercial, government, ...
    #[serde(default)]
    pub drone_pilot_type: Option<String>,
    #[serde(default)]
    pub drone_category: Option<String>,
    #[serde(default)]
    pub drone_weight: Option<String>,
}

impl FlightIntent {
    pub fn is_complete(&self) -> bool {
        is_set(&self.purpose) && is_set(&self.drone_pilot_type) && is_set(&self.drone_category)
    }
}

/// Step 2: where the flight takes place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub location_type: Option<String>,
    /// Derived from `coordinates`; never user input.
    #[serde(default, skip_deserializing)]
    pub airspace_type: Option<ZoneType>,
}

impl Location {
    pub fn is_complete(&self) -> bool {
        self.coordinates.is_some() && is_set(&self.location_type)
    }

    /// Urban and residential locations count as populated areas.
    pub fn is_over_populated_area(&self) -> bool {
        self.location_type.as_deref().is_some_and(|kind| {
            matches!(
                kind.trim().to_lowercase().as_str(),
                "urban" | "residential" | "populated"
            )
        })
    }
}

/// Step 3: when and how high.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Planned duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// Planned altitude in meters AGL
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub maintains_vlos: bool,
    #[serde(default)]
    pub is_night_operation: bool,
}

impl FlightDetails {
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.time.is_some() && self.altitude.is_some()
    }
}

/// Step 4: evaluation outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightResults {
    pub is_permitted: bool,
    pub permissions_required: Vec<String>,
    pub regulations_applicable: Vec<String>,
    pub advisory_messages: Vec<String>,
}

/// User-supplied wizard sections, as posted by a form or read from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPlanInput {
    #[serde(default)]
    pub intent: Option<FlightIntent>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub flight: Option<FlightDetails>,
}

/// Wizard working state.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPlan {
    step: Step,
    pub intent: Option<FlightIntent>,
    pub location: Option<Location>,
    pub flight: Option<FlightDetails>,
    results: Option<FlightResults>,
}

impl FlightPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from submitted sections, classifying any coordinates.
    ///
    /// The plan starts at step 1; results are not computed.
    pub fn from_input(input: FlightPlanInput, engine: &AirspaceEngine) -> Self {
        let mut plan = Self {
            intent: input.intent,
            location: input.location,
            flight: input.flight,
            ..Self::default()
        };
        plan.refresh_airspace_type(engine);
        plan
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn results(&self) -> Option<&FlightResults> {
        self.results.as_ref()
    }

    pub fn is_step_complete(&self, step: Step) -> bool {
        match step {
            Step::Intent => self.intent.as_ref().is_some_and(FlightIntent::is_complete),
            Step::Location => self.location.as_ref().is_some_and(Location::is_complete),
            Step::Flight => self.flight.as_ref().is_some_and(FlightDetails::is_complete),
            Step::Results => self.results.is_some(),
        }
    }

    /// Whether the "Next" control should be enabled.
    pub fn can_advance(&self) -> bool {
        self.step != Step::Results && self.is_step_complete(self.step)
    }

    /// Advance one step. Leaving the Flight step computes results.
    pub fn next(&mut self, engine: &AirspaceEngine) -> Result<Step, WizardError> {
        let current = self.step;
        let following = current.following().ok_or(WizardError::AtLastStep)?;
        if !self.is_step_complete(current) {
            return Err(WizardError::StepIncomplete(current));
        }

        if following == Step::Results && self.compute_results(engine).is_none() {
            // Reachable after a direct jump past an unfinished step.
            let missing = [Step::Intent, Step::Location, Step::Flight]
                .into_iter()
                .find(|step| !self.is_step_complete(*step))
                .unwrap_or(current);
            return Err(WizardError::StepIncomplete(missing));
        }

        self.step = following;
        Ok(self.step)
    }

    pub fn prev(&mut self) -> Result<Step, WizardError> {
        self.step = self.step.preceding().ok_or(WizardError::AtFirstStep)?;
        Ok(self.step)
    }

    /// Jump directly to step `n` (1-4).
    pub fn set_step(&mut self, n: u8) -> Result<Step, WizardError> {
        self.step = Step::try_from(n)?;
        Ok(self.step)
    }

    /// Set location coordinates and reclassify them.
    ///
    /// Allowed before the Location step is complete.
    pub fn set_coordinates(&mut self, coordinates: Coordinates, engine: &AirspaceEngine) -> ZoneType {
        let location = self.location.get_or_insert_with(Location::default);
        location.coordinates = Some(coordinates);
        let airspace_type = engine.classify(coordinates).most_restrictive;
        location.airspace_type = Some(airspace_type);
        airspace_type
    }

    /// Recompute `airspace_type` after `location` was edited directly.
    pub fn refresh_airspace_type(&mut self, engine: &AirspaceEngine) -> Option<ZoneType> {
        let location = self.location.as_mut()?;
        location.airspace_type = location
            .coordinates
            .map(|coordinates| engine.classify(coordinates).most_restrictive);
        location.airspace_type
    }

    /// Compute results once all sections are complete.
    ///
    /// Returns `None` without computing anything when input is incomplete.
    /// Once computed, results stay frozen until [`FlightPlan::reset`].
    pub fn compute_results(&mut self, engine: &AirspaceEngine) -> Option<&FlightResults> {
        if self.results.is_none() {
            let Some(profile) = FlightProfile::from_plan(self) else {
                tracing::debug!(step = %self.step, "Flight plan incomplete; not evaluating");
                return None;
            };
            let results = engine.evaluate(&profile);
            self.results = Some(results);
        }
        self.results.as_ref()
    }

    /// Recovery for reaching the Results step without results.
    pub fn ensure_results(&mut self, engine: &AirspaceEngine) -> Option<&FlightResults> {
        if self.step == Step::Results && self.results.is_none() {
            tracing::warn!("Results step reached without results; re-running evaluation");
        }
        self.compute_results(engine)
    }

    /// Discard everything and start a new plan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TRIBHUVAN_AIRPORT;

    fn engine() -> AirspaceEngine {
        AirspaceEngine::with_seed_catalog()
    }

    fn intent() -> FlightIntent {
        FlightIntent {
            purpose: Some("Photography".to_string()),
            drone_pilot_type: Some("recreational".to_string()),
            drone_category: Some("Multirotor".to_string()),
            drone_weight: Some("Under 2kg".to_string()),
        }
    }

    fn flight(altitude: f64) -> FlightDetails {
        FlightDetails {
            date: NaiveDate::from_ymd_opt(2026, 11, 2),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            duration: Some(20),
            altitude: Some(altitude),
            maintains_vlos: true,
            is_night_operation: false,
        }
    }

    fn complete_plan(engine: &AirspaceEngine, coordinates: Coordinates) -> FlightPlan {
        let mut plan = FlightPlan::new();
        plan.intent = Some(intent());
        plan.set_coordinates(coordinates, engine);
        if let Some(location) = plan.location.as_mut() {
            location.location_type = Some("rural".to_string());
        }
        plan.flight = Some(flight(60.0));
        plan
    }

    #[test]
    fn intent_step_needs_three_fields() {
        let mut plan = FlightPlan::new();
        assert_eq!(plan.step(), Step::Intent);
        assert!(!plan.is_step_complete(Step::Intent));

        plan.intent = Some(FlightIntent {
            purpose: Some("Survey".to_string()),
            ..FlightIntent::default()
        });
        assert!(!plan.is_step_complete(Step::Intent));

        plan.intent = Some(FlightIntent { drone_weight: None, ..intent() });
        assert!(plan.is_step_complete(Step::Intent));
    }

    #[test]
    fn blank_strings_do_not_count() {
        let mut plan = FlightPlan::new();
        plan.intent = Some(FlightIntent { purpose: Some("  ".to_string()), ..intent() });
        assert!(!plan.is_step_complete(Step::Intent));
    }

    #[test]
    fn next_is_gated_on_completeness() {
        let engine = engine();
        let mut plan = FlightPlan::new();
        assert!(!plan.can_advance());
        assert_eq!(plan.next(&engine), Err(WizardError::StepIncomplete(Step::Intent)));

        plan.intent = Some(intent());
        assert_eq!(plan.next(&engine), Ok(Step::Location));

        // Coordinates alone are not enough.
        plan.set_coordinates(Coordinates::new(27.9, 84.9), &engine);
        assert_eq!(plan.next(&engine), Err(WizardError::StepIncomplete(Step::Location)));
    }

    #[test]
    fn coordinates_are_classified_before_step_two_completes() {
        let engine = engine();
        let mut plan = FlightPlan::new();
        let kind = plan.set_coordinates(TRIBHUVAN_AIRPORT, &engine);
        assert_eq!(kind, ZoneType::Restricted);
        assert_eq!(plan.location.as_ref().and_then(|l| l.airspace_type), Some(ZoneType::Restricted));
        assert!(!plan.is_step_complete(Step::Location));

        // Moving the pin reclassifies.
        let kind = plan.set_coordinates(Coordinates::new(29.5, 81.0), &engine);
        assert_eq!(kind, ZoneType::Open);
    }

    #[test]
    fn leaving_flight_step_computes_results() {
        let engine = engine();
        let mut plan = complete_plan(&engine, TRIBHUVAN_AIRPORT);
        assert_eq!(plan.next(&engine), Ok(Step::Location));
        assert_eq!(plan.next(&engine), Ok(Step::Flight));
        assert!(plan.results().is_none());
        assert_eq!(plan.next(&engine), Ok(Step::Results));

        let results = plan.results().expect("results computed");
        assert!(!results.is_permitted);
        assert!(plan.is_step_complete(Step::Results));
        assert_eq!(plan.next(&engine), Err(WizardError::AtLastStep));
    }

    #[test]
    fn prev_and_set_step_are_bounded() {
        let mut plan = FlightPlan::new();
        assert_eq!(plan.prev(), Err(WizardError::AtFirstStep));
        assert_eq!(plan.set_step(3), Ok(Step::Flight));
        assert_eq!(plan.prev(), Ok(Step::Location));
        assert_eq!(plan.set_step(0), Err(WizardError::StepOutOfRange(0)));
        assert_eq!(plan.set_step(5), Err(WizardError::StepOutOfRange(5)));
        assert_eq!(plan.step(), Step::Location);
    }

    #[test]
    fn jumping_past_unfinished_steps_does_not_produce_results() {
        let engine = engine();
        let mut plan = FlightPlan::new();
        plan.flight = Some(flight(50.0));
        plan.set_step(3).unwrap();

        assert_eq!(plan.next(&engine), Err(WizardError::StepIncomplete(Step::Intent)));
        assert_eq!(plan.step(), Step::Flight);
        assert!(plan.compute_results(&engine).is_none());
    }

    #[test]
    fn results_step_without_results_recovers() {
        let engine = engine();
        let mut plan = complete_plan(&engine, Coordinates::new(29.5, 81.0));
        plan.set_step(4).unwrap();
        assert!(plan.results().is_none());

        let results = plan.ensure_results(&engine).cloned().expect("recovered");
        assert!(results.is_permitted);
        assert!(results.permissions_required.is_empty());
    }

    #[test]
    fn results_are_frozen_until_reset() {
        let engine = engine();
        let mut plan = complete_plan(&engine, Coordinates::new(29.5, 81.0));
        let first = plan.compute_results(&engine).cloned().unwrap();

        plan.flight = Some(flight(300.0));
        assert_eq!(plan.compute_results(&engine), Some(&first));

        plan.reset();
        assert_eq!(plan.step(), Step::Intent);
        assert!(plan.intent.is_none() && plan.location.is_none() && plan.flight.is_none());
        assert!(plan.results().is_none());
    }

    #[test]
    fn step_serializes_as_number() {
        assert_eq!(serde_json::to_value(Step::Flight).unwrap(), serde_json::json!(3));
        assert!(serde_json::from_value::<Step>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn submitted_airspace_type_is_ignored() {
        let engine = engine();
        let input: FlightPlanInput = serde_json::from_value(serde_json::json!({
            "location": {
                "coordinates": { "lat": 27.6989, "lng": 85.3592 },
                "locationType": "urban",
                "airspaceType": "open"
            }
        }))
        .unwrap();
        let plan = FlightPlan::from_input(input, &engine);
        let location = plan.location.as_ref().unwrap();
        assert_eq!(location.airspace_type, Some(ZoneType::Restricted));
        assert!(location.is_over_populated_area());
    }
}
