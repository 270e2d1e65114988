//! Where the CLI gets its zone and regulation catalogs.

use anyhow::{Context, Result};
use nepal_airspace_core::{AirspaceEngine, Catalog, ClassifierRules};
use std::path::PathBuf;

use crate::client::AirspaceClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in Nepal reference data
    Seed,
    /// JSON file with `airspaces` and `regulations` arrays
    File(PathBuf),
    /// Running airspace server
    Server(String),
}

impl CatalogSource {
    /// A catalog file wins over a server URL; neither means the seed.
    pub fn from_args(catalog: Option<PathBuf>, url: Option<String>) -> Self {
        match (catalog, url) {
            (Some(path), _) => Self::File(path),
            (None, Some(url)) => Self::Server(url),
            (None, None) => Self::Seed,
        }
    }

    fn fetch(&self) -> Result<Catalog> {
        match self {
            Self::Seed => Ok(Catalog::seed()),
            Self::File(path) => Catalog::from_path(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            Self::Server(url) => AirspaceClient::new(url.as_str())?.fetch_catalog(),
        }
    }

    /// Load the catalog. With `allow_empty`, a failed load yields an empty
    /// catalog instead of an error.
    pub fn load(&self, allow_empty: bool) -> Result<Catalog> {
        match self.fetch() {
            Ok(catalog) => {
                tracing::debug!(
                    source = ?self,
                    zones = catalog.airspaces.len(),
                    regulations = catalog.regulations.len(),
                    "Catalog loaded"
                );
                Ok(catalog)
            }
            Err(err) if allow_empty => {
                tracing::warn!(source = ?self, "Continuing with an empty catalog: {:#}", err);
                Ok(Catalog::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn engine(&self, allow_empty: bool, rules: ClassifierRules) -> Result<AirspaceEngine> {
        let catalog = self.load(allow_empty)?;
        AirspaceEngine::from_catalog(catalog, rules).context("Catalog failed validation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nepal_airspace_core::Coordinates;
    use std::io::Write;

    #[test]
    fn file_takes_precedence_over_url() {
        let source = CatalogSource::from_args(
            Some(PathBuf::from("zones.json")),
            Some("http://localhost:3000".to_string()),
        );
        assert_eq!(source, CatalogSource::File(PathBuf::from("zones.json")));
        assert_eq!(CatalogSource::from_args(None, None), CatalogSource::Seed);
    }

    #[test]
    fn loads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Catalog::seed()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let source = CatalogSource::File(file.path().to_path_buf());
        let engine = source.engine(false, ClassifierRules::default()).unwrap();
        assert_eq!(engine.registry().len(), Catalog::seed().airspaces.len());
        assert!(!engine.classify(Coordinates::new(27.6989, 85.3592)).zones.is_empty());
    }

    #[test]
    fn unreadable_zone_record_does_not_drop_the_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"airspaces": [
                {{"id": "kept", "name": "Kept", "type": "advisory",
                  "geometry": {{"type": "Circle", "center": {{"lat": 27.7, "lng": 85.3}}, "radius": 800.0}}}},
                {{"id": "lost", "name": "Lost", "type": "restricted",
                  "geometry": {{"type": "Circle", "radius": 800.0}}}}
            ]}}"#
        )
        .unwrap();

        let source = CatalogSource::File(file.path().to_path_buf());
        let engine = source.engine(false, ClassifierRules::default()).unwrap();
        assert_eq!(engine.registry().len(), 1);
        assert_eq!(
            engine.classify(Coordinates::new(27.7, 85.3)).zone_ids(),
            ["kept"]
        );
    }

    #[test]
    fn missing_file_is_an_error_unless_empty_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::File(dir.path().join("missing.json"));

        assert!(source.load(false).is_err());

        let engine = source.engine(true, ClassifierRules::default()).unwrap();
        assert!(engine.registry().is_empty());
        assert!(engine.regulations().is_empty());
    }
}
