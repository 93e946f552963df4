//! Catalog manifest headers.
//!
//! A manifest is a JSON array of lightweight headers, one per
//! (model_id, version). Headers carry just enough to answer cheap filter
//! attributes without fetching the full detail record.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::version::ModelVersion;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Read(String),

    #[error("invalid manifest JSON: {0}")]
    Json(String),

    #[error("invalid manifest entry: {0}")]
    Invalid(String),
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelHeader {
    /// Catalog identifier (e.g. "pytorch-eqa-bert-base-cased").
    pub model_id: String,
    /// Semantic version string.
    pub version: String,
    /// Minimum SDK version able to run this entry.
    #[serde(default = "default_min_version")]
    pub min_version: String,
    /// Location of the detail record, opaque to the engine.
    #[serde(default)]
    pub spec_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_vulnerable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_vulnerable: Option<bool>,
}

fn default_min_version() -> String {
    "0.0.0".to_string()
}

impl ModelHeader {
    pub fn new(model_id: impl Into<String>, version: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let version = version.into();
        let spec_key = format!("specs/{}/{}.json", model_id, version);
        Self {
            model_id,
            version,
            min_version: default_min_version(),
            spec_key,
            deprecated: None,
            inference_vulnerable: None,
            training_vulnerable: None,
        }
    }

    pub fn with_min_version(mut self, min_version: impl Into<String>) -> Self {
        self.min_version = min_version.into();
        self
    }

    pub fn parsed_version(&self) -> ModelVersion {
        ModelVersion::lenient(&self.version)
    }

    /// Framework segment of a `<framework>-<task>-<name>` identifier.
    pub fn framework(&self) -> Option<&str> {
        split_model_id(&self.model_id).map(|(framework, _, _)| framework)
    }

    /// Task segment of a `<framework>-<task>-<name>` identifier.
    pub fn task(&self) -> Option<&str> {
        split_model_id(&self.model_id).map(|(_, task, _)| task)
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.model_id.trim().is_empty() {
            return Err(ManifestError::Invalid("model_id cannot be empty".into()));
        }
        if self.version.trim().is_empty() {
            return Err(ManifestError::Invalid(format!(
                "version cannot be empty for {}",
                self.model_id
            )));
        }
        Ok(())
    }
}

/// Split an identifier following the `<framework>-<task>-<name>` convention.
///
/// Returns `None` unless all three segments are present and non-empty.
pub fn split_model_id(model_id: &str) -> Option<(&str, &str, &str)> {
    let mut parts = model_id.splitn(3, '-');
    let framework = parts.next().filter(|s| !s.is_empty())?;
    let task = parts.next().filter(|s| !s.is_empty())?;
    let name = parts.next().filter(|s| !s.is_empty())?;
    Some((framework, task, name))
}

/// Load a manifest from a JSON file.
pub fn manifest_from_file(path: &Path) -> Result<Vec<ModelHeader>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read(e.to_string()))?;
    manifest_from_json(&content)
}

/// Parse and validate a manifest JSON array.
pub fn manifest_from_json(json: &str) -> Result<Vec<ModelHeader>, ManifestError> {
    let headers: Vec<ModelHeader> =
        serde_json::from_str(json).map_err(|e| ManifestError::Json(e.to_string()))?;
    for header in &headers {
        header.validate()?;
    }
    Ok(headers)
}
