//! HTTP client for the airspace server catalog endpoints.

use anyhow::{Context, Result};
use nepal_airspace_core::{zones_from_values, AirspaceZone, Catalog, Regulation};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for fetching zones and regulations from a server.
pub struct AirspaceClient {
    client: Client,
    base_url: String,
}

impl AirspaceClient {
    /// Create a client for `base_url` (e.g., "http://localhost:3000").
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Fetching");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()
            .with_context(|| format!("Server rejected {}", url))?;
        response
            .json()
            .with_context(|| format!("Unexpected response body from {}", url))
    }

    /// Zone records are decoded one by one; unreadable ones are skipped.
    pub fn fetch_airspaces(&self) -> Result<Vec<AirspaceZone>> {
        let records: Vec<serde_json::Value> = self.get_json("/api/airspaces")?;
        Ok(zones_from_values(records))
    }

    pub fn fetch_regulations(&self) -> Result<Vec<Regulation>> {
        self.get_json("/api/regulations")
    }

    /// Both catalogs; fails if either request fails.
    pub fn fetch_catalog(&self) -> Result<Catalog> {
        Ok(Catalog {
            airspaces: self.fetch_airspaces()?,
            regulations: self.fetch_regulations()?,
        })
    }
}
