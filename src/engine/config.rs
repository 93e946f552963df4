//! Engine configuration.
//!
//! All fields have safe defaults. Configuration is validated before use.

use std::time::Duration;

use super::error::CatalogError;
use crate::models::ModelVersion;

/// Upper bound on concurrent entry evaluations.
pub const MAX_CONCURRENT_FETCHES_CAP: usize = 256;

pub const DEFAULT_REGION: &str = "us-west-2";

/// Per-engine query configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Running SDK version, compared against each entry's `min_version`.
    pub sdk_version: ModelVersion,
    /// Entries evaluated concurrently per query (each may fetch a detail record).
    pub max_concurrent_fetches: usize,
    /// Deadline applied to queries that do not set their own. None = no deadline.
    pub deadline: Option<Duration>,
    /// Region used when a query does not name one.
    pub default_region: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sdk_version: ModelVersion::lenient(env!("CARGO_PKG_VERSION")),
            max_concurrent_fetches: num_cpus::get().max(1),
            deadline: None,
            default_region: DEFAULT_REGION.to_string(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration values. Returns error on invalid values.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.sdk_version.is_valid() {
            return Err(CatalogError::InvalidConfig(format!(
                "sdk_version '{}' is not a version",
                self.sdk_version
            )));
        }
        if self.max_concurrent_fetches == 0 || self.max_concurrent_fetches > MAX_CONCURRENT_FETCHES_CAP {
            return Err(CatalogError::InvalidConfig(format!(
                "max_concurrent_fetches must be in 1..={}",
                MAX_CONCURRENT_FETCHES_CAP
            )));
        }
        if self.deadline == Some(Duration::ZERO) {
            return Err(CatalogError::InvalidConfig("deadline must be > 0".into()));
        }
        if self.default_region.trim().is_empty() {
            return Err(CatalogError::InvalidConfig("default_region must not be empty".into()));
        }
        Ok(())
    }

    /// Config pinned to a given SDK version, otherwise default.
    pub fn for_sdk(sdk_version: &str) -> Self {
        Self {
            sdk_version: ModelVersion::lenient(sdk_version),
            ..Self::default()
        }
    }
}
