//! Catalog entry types.
//!
//! Manifest headers (cheap tier), detail records (expensive tier) and the
//! version ordering shared by both.

pub mod manifest;
pub mod specs;
pub mod version;

pub use manifest::{manifest_from_file, manifest_from_json, split_model_id, ManifestError, ModelHeader};
pub use specs::{ModelSpecs, SpecsError};
pub use version::{ModelVersion, VersionError};
