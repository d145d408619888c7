//! triage-catalog
//!
//! Predictive-model registry, payload parameter extraction, and
//! required-parameter matching. Pure data: no async, no network.

pub mod builtin;
pub mod error;
pub mod extract;
pub mod satisfaction;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use triage_core::models::model_spec::ModelSpec;

use crate::error::CatalogError;

/// Highest catalog document version this build understands.
pub const CATALOG_VERSION: u32 = 1;

/// One model entry as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub name: String,
    pub parameters: Vec<String>,
    pub tool: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CatalogRecord> for ModelSpec {
    fn from(r: CatalogRecord) -> Self {
        ModelSpec {
            name: r.name,
            required_parameters: r.parameters,
            backend_tool: r.tool,
            description: r.description,
        }
    }
}

/// Either a bare list of records or a versioned document wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Versioned {
        version: u32,
        models: Vec<CatalogRecord>,
    },
    Bare(Vec<CatalogRecord>),
}

/// Read-only registry of model definitions, in load order.
///
/// Loaded once at process start and shared by every run; never mutated.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelSpec>,
    index: HashMap<String, usize>,
}

impl ModelCatalog {
    /// Load and validate a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_slice(&bytes)?;
        info!(path = %path.display(), models = catalog.len(), "model catalog loaded");
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let records = match serde_json::from_slice::<CatalogDocument>(bytes)? {
            CatalogDocument::Versioned { version, models } => {
                if version > CATALOG_VERSION {
                    return Err(CatalogError::UnsupportedVersion {
                        found: version,
                        supported: CATALOG_VERSION,
                    });
                }
                models
            }
            CatalogDocument::Bare(models) => models,
        };
        Self::from_specs(records.into_iter().map(ModelSpec::from).collect())
    }

    /// The catalog shipped with the router. See [`builtin`].
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_specs(builtin::builtin_models().to_vec())
    }

    /// Validate specs and build the catalog, preserving their order.
    pub fn from_specs(models: Vec<ModelSpec>) -> Result<Self, CatalogError> {
        if models.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(models.len());
        for (position, spec) in models.iter().enumerate() {
            validate_spec(spec)?;
            if index.insert(spec.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateModel(spec.name.clone()));
            }
        }

        Ok(Self { models, index })
    }

    pub fn lookup(&self, name: &str) -> Option<&ModelSpec> {
        self.index.get(name).map(|&i| &self.models[i])
    }

    /// All models in load order. Dispatch iterates in this order.
    pub fn all(&self) -> &[ModelSpec] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Every parameter any model needs, first occurrence wins the order.
    pub fn parameter_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.models
            .iter()
            .flat_map(|m| &m.required_parameters)
            .map(String::as_str)
            .filter(|p| seen.insert(*p))
            .collect()
    }
}

fn validate_spec(spec: &ModelSpec) -> Result<(), CatalogError> {
    if spec.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if spec.backend_tool.trim().is_empty() {
        return Err(CatalogError::EmptyTool(spec.name.clone()));
    }
    if spec.required_parameters.is_empty() {
        return Err(CatalogError::EmptyParameters(spec.name.clone()));
    }

    let mut seen = HashSet::new();
    for parameter in &spec.required_parameters {
        if parameter.trim().is_empty() {
            return Err(CatalogError::BlankParameter(spec.name.clone()));
        }
        if !seen.insert(parameter.as_str()) {
            return Err(CatalogError::DuplicateParameter {
                model: spec.name.clone(),
                parameter: parameter.clone(),
            });
        }
    }
    Ok(())
}
