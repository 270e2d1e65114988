//! Shared library surface for the airspace server and its tests.

pub mod api;
pub mod config;
pub mod state;
