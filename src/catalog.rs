//! Static bug catalog embedded in every AI prompt.
//!
//! The catalog is loaded once at startup, serialized to compact JSON, and
//! shared read-only. It is never filtered or ranked server-side; the model
//! receives the whole thing.

use std::path::Path;

use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../data/bugs.json");

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog read failed: {path}: {message}")]
    Read { path: String, message: String },
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One known defect, as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub severity: String,
    pub product: String,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// Read-only catalog plus its prompt serialization.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<BugRecord>,
    serialized: String,
}

impl Catalog {
    /// Parse a catalog from a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] when the JSON is not an array of records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<BugRecord> = serde_json::from_str(json)?;
        let serialized = serde_json::to_string(&records)?;
        Ok(Self { records, serialized })
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the bundled data is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load from `path` if given, else fall back to the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            return Self::builtin();
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Read { path: path.display().to_string(), message: e.to_string() })?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn records(&self) -> &[BugRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compact JSON form, embedded verbatim in the prompt.
    #[must_use]
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// Instruction text sent alongside the uploaded image.
    #[must_use]
    pub fn instruction(&self) -> String {
        format!("Use this {} data and respond with the resolution provided.", self.serialized())
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
