use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::instance::Instance;
use crate::parsing::json::InstanceData;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate instance id: {0}")]
    DuplicateId(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// An instance together with its known optimum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInstance {
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(flatten)]
    pub data: InstanceData,

    /// Cost of the minimum-weight perfect matching
    pub expected_cost: f64,
}

impl ReferenceInstance {
    /// Build the instance this entry describes.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the entry's `costs` or `points` are invalid.
    pub fn instance(&self) -> Result<Instance, ParseError> {
        self.data.clone().into_instance()
    }
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub instances: Vec<ReferenceInstance>,
}

/// Reference instances indexed by id
#[derive(Debug, Default)]
pub struct InstanceCatalog {
    pub instances: Vec<ReferenceInstance>,

    id_to_index: HashMap<String, usize>,
}

impl InstanceCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog cannot be parsed.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time, validated by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/reference_instances.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or two entries share an id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        let mut catalog = Self::new();
        for instance in data.instances {
            catalog.add_instance(instance)?;
        }
        Ok(catalog)
    }

    /// Add an entry to the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if the id is already present.
    pub fn add_instance(&mut self, instance: ReferenceInstance) -> Result<(), CatalogError> {
        if self.id_to_index.contains_key(&instance.id) {
            return Err(CatalogError::DuplicateId(instance.id));
        }
        self.id_to_index
            .insert(instance.id.clone(), self.instances.len());
        self.instances.push(instance);
        Ok(())
    }

    /// Get an entry by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ReferenceInstance> {
        self.id_to_index.get(id).map(|&idx| &self.instances[idx])
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            instances: self.instances.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
