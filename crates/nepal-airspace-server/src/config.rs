//! Server configuration from environment.

use nepal_airspace_core::ContainmentStrategy;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// JSON catalog to load instead of the built-in Nepal data
    pub catalog_path: Option<String>,
    pub containment: ContainmentStrategy,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("AIRSPACE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            catalog_path: env::var("AIRSPACE_CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            containment: env::var("AIRSPACE_CONTAINMENT")
                .ok()
                .and_then(|value| {
                    let parsed = ContainmentStrategy::parse(&value);
                    if parsed.is_none() {
                        tracing::warn!(%value, "Unknown AIRSPACE_CONTAINMENT; using default");
                    }
                    parsed
                })
                .unwrap_or_default(),
        }
    }
}
