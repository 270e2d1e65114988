//! Nepal airspace CLI - catalog loading and report rendering.
//!
//! The `nepal-airspace` binary classifies points and routes and checks
//! complete flight plans against a catalog from one of:
//! - the built-in Nepal data
//! - a JSON catalog file
//! - a running airspace server

pub mod client;
pub mod report;
pub mod source;
pub mod waypoint;

pub use client::AirspaceClient;
pub use source::CatalogSource;
pub use waypoint::parse_waypoint;
