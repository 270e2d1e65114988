//! Airspace zone containment and regulation resolution for drone flight
//! planning in Nepal.
//!
//! The crate is pure and synchronous: callers hand it zone and regulation
//! catalogs, then classify points or routes and evaluate flight plans.

pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod models;
pub mod priority;
pub mod registry;
pub mod regulations;
pub mod rules;
pub mod spatial;
pub mod wizard;

pub use catalog::{check_consistency, seed_regulations, seed_zones, zones_from_values, Catalog};
pub use classifier::{zone_contains, zones_along_route, zones_containing};
pub use engine::{AirspaceEngine, Classification, FlightProfile};
pub use error::{CatalogError, WizardError};
pub use models::{
    AirspaceZone, Coordinates, CreateZoneRequest, FlightCondition, Regulation, ZoneGeometry,
    ZoneType,
};
pub use registry::ZoneRegistry;
pub use regulations::{
    advisory_messages, applicable_regulations, is_permitted, required_permissions,
    FlightParameters,
};
pub use rules::{ClassifierRules, ContainmentStrategy};
pub use spatial::haversine_distance;
pub use wizard::{
    FlightDetails, FlightIntent, FlightPlan, FlightPlanInput, FlightResults, Location, Step,
};
