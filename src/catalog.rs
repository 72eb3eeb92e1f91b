//! Static source catalog
//!
//! The provider's sources are shipped as a read-only JSON file mapping
//! human-readable names to source identifiers. The catalog is loaded
//! once and kept for the process lifetime; a missing or corrupt file is
//! a blocking error for source selection only, never a crash.

use crate::error::{Result, SercatError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

static SHARED: OnceLock<SourceCatalog> = OnceLock::new();

/// One named source in the provider's catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Provider-side source identifier
    pub id: String,
    /// Human-readable publisher/category name
    pub name: String,
}

/// Wire shape of the sources file: `{"data": [{"id", "name"}, ...]}`
#[derive(Debug, Deserialize)]
struct SourcesFile {
    #[serde(default)]
    data: Vec<Source>,
}

/// In-memory source catalog, read-only after load
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    sources: Vec<Source>,
}

impl SourceCatalog {
    /// Load the catalog from a JSON file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the sources JSON file
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Catalog` if the file is missing or cannot
    /// be parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::error!("Sources file not found: {}", path.display());
            return Err(SercatError::Catalog(format!(
                "Sources file not found: {}",
                path.display()
            ))
            .into());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| SercatError::Catalog(format!("Failed to read sources file: {}", e)))?;

        let file: SourcesFile = serde_json::from_str(&contents).map_err(|e| {
            tracing::error!("JSON decode error in {}: {}", path.display(), e);
            SercatError::Catalog(format!("Failed to parse sources file: {}", e))
        })?;

        tracing::info!("Loaded {} sources from {}", file.data.len(), path.display());
        Ok(Self { sources: file.data })
    }

    /// Process-wide catalog, loaded on first use
    ///
    /// The first successful load is cached for the process lifetime;
    /// later calls return the cached catalog and ignore the path. Load
    /// failures are not cached, so a fixed sources file is picked up
    /// on the next attempt.
    ///
    /// # Errors
    ///
    /// Propagates `SercatError::Catalog` from the underlying load
    pub fn shared(path: impl AsRef<Path>) -> Result<&'static SourceCatalog> {
        if let Some(catalog) = SHARED.get() {
            return Ok(catalog);
        }
        let catalog = Self::load(path)?;
        Ok(SHARED.get_or_init(|| catalog))
    }

    /// All sources, in file order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Number of sources in the catalog
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when the catalog holds no sources
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve a user-supplied source reference to a catalog entry
    ///
    /// Matches by exact id first, then by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Catalog` if no source matches
    pub fn resolve(&self, reference: &str) -> Result<&Source> {
        if let Some(source) = self.sources.iter().find(|s| s.id == reference) {
            return Ok(source);
        }

        let lowered = reference.to_lowercase();
        self.sources
            .iter()
            .find(|s| s.name.to_lowercase() == lowered)
            .ok_or_else(|| {
                SercatError::Catalog(format!("Unknown source: {}", reference)).into()
            })
    }
}
