//! Cost-tiered attribute resolution.
//!
//! The header tier answers from the manifest entry at no cost. Anything it
//! cannot answer is reported as `NeedsDetail`, and the evaluator decides
//! whether the detail fetch is worth making.

use crate::filter::AttrValue;
use crate::models::{ModelHeader, ModelSpecs, ModelVersion};

/// Where an attribute's value comes from for one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Answered by the header, no fetch.
    Cheap(AttrValue),
    /// Only the detail record can answer.
    NeedsDetail,
    /// No tier can produce a comparable value.
    Unresolved,
}

/// Header-tier resolver.
#[derive(Debug, Clone)]
pub struct HeaderResolver {
    sdk_version: ModelVersion,
}

impl HeaderResolver {
    /// `sdk_version` is the running SDK version used for `supported_model`.
    pub fn new(sdk_version: ModelVersion) -> Self {
        Self { sdk_version }
    }

    pub fn sdk_version(&self) -> &ModelVersion {
        &self.sdk_version
    }

    /// Whether the running SDK satisfies the entry's minimum version.
    ///
    /// `None` if either version does not parse.
    pub fn is_supported(&self, header: &ModelHeader) -> Option<bool> {
        let min = ModelVersion::parse(&header.min_version).ok()?;
        if !self.sdk_version.is_valid() {
            return None;
        }
        Some(min <= self.sdk_version)
    }

    pub fn resolve(&self, header: &ModelHeader, attribute: &str) -> Resolution {
        let text = |s: &str| Resolution::Cheap(AttrValue::Str(s.to_string()));
        let flag = |f: Option<bool>| match f {
            Some(b) => Resolution::Cheap(AttrValue::Bool(b)),
            None => Resolution::NeedsDetail,
        };
        match attribute {
            "model_id" => text(&header.model_id),
            "version" => text(&header.version),
            "min_version" => text(&header.min_version),
            "spec_key" if !header.spec_key.is_empty() => text(&header.spec_key),
            "supported_model" => match self.is_supported(header) {
                Some(b) => Resolution::Cheap(AttrValue::Bool(b)),
                None => Resolution::Unresolved,
            },
            "framework" => header.framework().map_or(Resolution::NeedsDetail, text),
            "task" => header.task().map_or(Resolution::NeedsDetail, text),
            "deprecated" => flag(header.deprecated),
            "inference_vulnerable" => flag(header.inference_vulnerable),
            "training_vulnerable" => flag(header.training_vulnerable),
            _ => Resolution::NeedsDetail,
        }
    }

    /// Resolve with the detail record at hand: header tier first.
    pub fn resolve_with_detail(
        &self,
        header: &ModelHeader,
        specs: &ModelSpecs,
        attribute: &str,
    ) -> Option<AttrValue> {
        match self.resolve(header, attribute) {
            Resolution::Cheap(value) => Some(value),
            Resolution::NeedsDetail => specs.attribute(attribute),
            Resolution::Unresolved => None,
        }
    }
}
