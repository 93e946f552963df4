//! Configuration loading from environment variables.
//!
//! All configuration values are loaded from `GG_CATALOG_*` environment
//! variables with sensible defaults. Invalid values fall back to defaults
//! without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `GG_CATALOG_ROOT` | `./catalog` | Local catalog root directory |
//! | `GG_CATALOG_REGION` | `us-west-2` | Default region |
//! | `GG_CATALOG_SDK_VERSION` | crate version | SDK version for `supported_model` |
//! | `GG_CATALOG_MAX_CONCURRENT_FETCHES` | CPU count | Concurrent entry evaluations (1..=256) |
//! | `GG_CATALOG_QUERY_DEADLINE_MS` | 0 | Per-query deadline (0 = none) |
//! | `GG_CATALOG_LOG_LEVEL` | `info` | Tracing filter directive |
//! | `GG_CATALOG_LOG_FORMAT` | `pretty` | `json` or `pretty` |

use std::path::PathBuf;
use std::time::Duration;

use crate::engine::{EngineConfig, DEFAULT_REGION, MAX_CONCURRENT_FETCHES_CAP};
use crate::models::ModelVersion;
use crate::telemetry::{LogConfig, LogFormat};

pub const DEFAULT_ROOT: &str = "./catalog";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Serializes env-mutating tests across modules.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Effective configuration summary.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub root: String,
    pub region: String,
    pub sdk_version: String,
    pub max_concurrent_fetches: usize,
    pub query_deadline_ms: u64,
    pub log_level: String,
    pub log_format: String,
}

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub root: PathBuf,
    pub region: String,
    pub sdk_version: ModelVersion,
    pub max_concurrent_fetches: usize,
    pub query_deadline: Option<Duration>,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Parse a `usize` env var, returning `default` on missing or invalid.
fn parse_usize(key: &str, default: usize) -> usize {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<usize>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Parse a `u64` env var, returning `default` on missing or invalid.
fn parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Read a non-empty string env var.
fn parse_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn crate_sdk_version() -> ModelVersion {
    ModelVersion::lenient(env!("CARGO_PKG_VERSION"))
}

/// SDK version from env; unparseable values fall back to the crate version.
fn load_sdk_version() -> ModelVersion {
    parse_string("GG_CATALOG_SDK_VERSION")
        .and_then(|raw| ModelVersion::parse(&raw).ok())
        .unwrap_or_else(crate_sdk_version)
}

fn load_log_format() -> LogFormat {
    parse_string("GG_CATALOG_LOG_FORMAT")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    let max_concurrent_fetches = parse_usize("GG_CATALOG_MAX_CONCURRENT_FETCHES", num_cpus::get());
    let max_concurrent_fetches = max_concurrent_fetches.clamp(1, MAX_CONCURRENT_FETCHES_CAP);
    let deadline_ms = parse_u64("GG_CATALOG_QUERY_DEADLINE_MS", 0);

    EnvConfig {
        root: PathBuf::from(parse_string("GG_CATALOG_ROOT").unwrap_or_else(|| DEFAULT_ROOT.into())),
        region: parse_string("GG_CATALOG_REGION").unwrap_or_else(|| DEFAULT_REGION.into()),
        sdk_version: load_sdk_version(),
        max_concurrent_fetches,
        query_deadline: (deadline_ms > 0).then(|| Duration::from_millis(deadline_ms)),
        log_level: parse_string("GG_CATALOG_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
        log_format: load_log_format(),
    }
}

impl EnvConfig {
    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            sdk_version: self.sdk_version.clone(),
            max_concurrent_fetches: self.max_concurrent_fetches,
            deadline: self.query_deadline,
            default_region: self.region.clone(),
        }
    }

    /// Logging settings derived from this configuration.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            output_path: None,
        }
    }

    /// Return a summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            root: self.root.display().to_string(),
            region: self.region.clone(),
            sdk_version: self.sdk_version.to_string(),
            max_concurrent_fetches: self.max_concurrent_fetches,
            query_deadline_ms: self.query_deadline.map_or(0, |d| d.as_millis() as u64),
            log_level: self.log_level.clone(),
            log_format: self.log_format.to_string(),
        }
    }
}
