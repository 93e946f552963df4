//! Detail records for catalog entries.
//!
//! A detail record is the expensive tier: fetching one costs a round trip per
//! (model_id, version, region). Only shallow scalar attributes are queryable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::filter::AttrValue;

#[derive(Debug, Error)]
pub enum SpecsError {
    #[error("invalid detail record JSON: {0}")]
    Json(String),

    #[error("detail record mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

/// Full attribute set for one (model_id, version).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpecs {
    pub model_id: String,
    pub version: String,
    #[serde(default)]
    pub min_sdk_version: String,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub training_supported: bool,
    #[serde(default)]
    pub incremental_training_supported: bool,
    #[serde(default)]
    pub inference_vulnerable: bool,
    #[serde(default)]
    pub training_vulnerable: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Remaining source attributes, nested ones included.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelSpecs {
    pub fn new(model_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SpecsError> {
        serde_json::from_str(json).map_err(|e| SpecsError::Json(e.to_string()))
    }

    /// Check the record describes the entry it was fetched for.
    pub fn ensure_matches(&self, model_id: &str, version: &str) -> Result<(), SpecsError> {
        if self.model_id != model_id || self.version != version {
            return Err(SpecsError::Mismatch {
                expected: format!("{}@{}", model_id, version),
                actual: format!("{}@{}", self.model_id, self.version),
            });
        }
        Ok(())
    }

    /// Look up a shallow attribute by name.
    ///
    /// Empty strings and nested values do not resolve.
    pub fn attribute(&self, name: &str) -> Option<AttrValue> {
        let text = |s: &str| (!s.is_empty()).then(|| AttrValue::Str(s.to_string()));
        match name {
            "model_id" => text(&self.model_id),
            "version" => text(&self.version),
            "min_sdk_version" => text(&self.min_sdk_version),
            "framework" => text(&self.framework),
            "task" => text(&self.task),
            "training_supported" => Some(AttrValue::Bool(self.training_supported)),
            "incremental_training_supported" => {
                Some(AttrValue::Bool(self.incremental_training_supported))
            }
            "inference_vulnerable" => Some(AttrValue::Bool(self.inference_vulnerable)),
            "training_vulnerable" => Some(AttrValue::Bool(self.training_vulnerable)),
            "deprecated" => Some(AttrValue::Bool(self.deprecated)),
            "url" => self.url.as_deref().and_then(text),
            other => self.extra.get(other).and_then(AttrValue::from_json),
        }
    }
}
