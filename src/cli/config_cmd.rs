// Copyright 2024-2026 GG-CORE Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults, validate.
//!
//! These commands read configuration directly from environment variables
//! without touching the catalog.

use tracing_subscriber::EnvFilter;

use crate::config::{self, EffectiveConfig, DEFAULT_LOG_LEVEL, DEFAULT_ROOT};
use crate::engine::DEFAULT_REGION;
use crate::models::ModelVersion;

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    let cfg = config::load().effective_config();
    print_config(&cfg);
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    println!("GG_CATALOG_ROOT={}", DEFAULT_ROOT);
    println!("GG_CATALOG_REGION={}", DEFAULT_REGION);
    println!("GG_CATALOG_SDK_VERSION={}", env!("CARGO_PKG_VERSION"));
    println!("GG_CATALOG_MAX_CONCURRENT_FETCHES={}", num_cpus::get().max(1));
    println!("GG_CATALOG_QUERY_DEADLINE_MS=0");
    println!("GG_CATALOG_LOG_LEVEL={}", DEFAULT_LOG_LEVEL);
    println!("GG_CATALOG_LOG_FORMAT=pretty");
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 1 if any warnings are found.
pub fn run_validate() -> i32 {
    let env = config::load();
    let mut warnings = 0;

    if let Ok(raw) = std::env::var("GG_CATALOG_SDK_VERSION") {
        if ModelVersion::parse(&raw).is_err() {
            eprintln!(
                "WARNING: GG_CATALOG_SDK_VERSION ({}) is not a version; using {}",
                raw, env.sdk_version
            );
            warnings += 1;
        }
    }

    if let Ok(raw) = std::env::var("GG_CATALOG_LOG_FORMAT") {
        if raw.parse::<crate::telemetry::LogFormat>().is_err() {
            eprintln!("WARNING: GG_CATALOG_LOG_FORMAT ({}) is not json or pretty", raw);
            warnings += 1;
        }
    }

    if EnvFilter::try_new(&env.log_level).is_err() {
        eprintln!("WARNING: GG_CATALOG_LOG_LEVEL ({}) is not a valid filter", env.log_level);
        warnings += 1;
    }

    if !env.root.is_dir() {
        eprintln!(
            "WARNING: GG_CATALOG_ROOT ({}) is not a directory",
            env.root.display()
        );
        warnings += 1;
    } else if !env.root.join(&env.region).is_dir() {
        eprintln!(
            "WARNING: region '{}' has no directory under {}",
            env.region,
            env.root.display()
        );
        warnings += 1;
    }

    if let Err(e) = env.engine_config().validate() {
        eprintln!("WARNING: {}", e);
        warnings += 1;
    }

    if warnings == 0 {
        println!("Configuration is valid.");
        0
    } else {
        1
    }
}

fn print_config(cfg: &EffectiveConfig) {
    println!("GG_CATALOG_ROOT={}", cfg.root);
    println!("GG_CATALOG_REGION={}", cfg.region);
    println!("GG_CATALOG_SDK_VERSION={}", cfg.sdk_version);
    println!("GG_CATALOG_MAX_CONCURRENT_FETCHES={}", cfg.max_concurrent_fetches);
    println!("GG_CATALOG_QUERY_DEADLINE_MS={}", cfg.query_deadline_ms);
    println!("GG_CATALOG_LOG_LEVEL={}", cfg.log_level);
    println!("GG_CATALOG_LOG_FORMAT={}", cfg.log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_LOCK;

    const ENV_KEYS: &[&str] = &[
        "GG_CATALOG_ROOT",
        "GG_CATALOG_REGION",
        "GG_CATALOG_SDK_VERSION",
        "GG_CATALOG_MAX_CONCURRENT_FETCHES",
        "GG_CATALOG_LOG_LEVEL",
        "GG_CATALOG_LOG_FORMAT",
    ];

    fn clear_env() {
        for k in ENV_KEYS {
            std::env::remove_var(k);
        }
    }

    #[test]
    fn test_validate_passes_with_existing_root() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("us-west-2")).unwrap();
        std::env::set_var("GG_CATALOG_ROOT", dir.path());
        assert_eq!(run_validate(), 0, "default config over a real root should pass");
        clear_env();
    }

    #[test]
    fn test_validate_warns_on_missing_root() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("GG_CATALOG_ROOT", "/nonexistent/gg-catalog-root");
        assert_eq!(run_validate(), 1);
        clear_env();
    }

    #[test]
    fn test_validate_warns_on_bad_sdk_version() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("us-west-2")).unwrap();
        std::env::set_var("GG_CATALOG_ROOT", dir.path());
        std::env::set_var("GG_CATALOG_SDK_VERSION", "latest");
        assert_eq!(run_validate(), 1);
        clear_env();
    }

    #[test]
    fn test_print_config_includes_all_fields() {
        let cfg = EffectiveConfig {
            root: "./catalog".into(),
            region: "us-west-2".into(),
            sdk_version: "0.8.1".into(),
            max_concurrent_fetches: 8,
            query_deadline_ms: 0,
            log_level: "info".into(),
            log_format: "pretty".into(),
        };
        print_config(&cfg);
    }
}
