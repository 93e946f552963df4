// Copyright 2024-2026 GG-CORE Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for catalog commands.
//!
//! Commands run against the local catalog named by `GG_CATALOG_ROOT`.
//!
//! ## Usage
//!
//! ```bash
//! gg-catalog query "framework == pytorch" --versions
//! gg-catalog frameworks
//! gg-catalog scripts "task == ic"
//! gg-catalog url pytorch-ic-mobilenet 2.0.0
//! ```

pub mod config_cmd;
pub mod query_cmd;

use std::sync::Arc;

use crate::config::EnvConfig;
use crate::engine::{CatalogError, CatalogQueryEngine};
use crate::store::LocalCatalog;

pub use query_cmd::{parse_query_args, run_listing, run_query, run_url, Listing, QueryArgs};

/// Command completed.
pub const EXIT_OK: i32 = 0;
/// Bad arguments or filter.
pub const EXIT_USAGE: i32 = 1;
/// Catalog could not be read.
pub const EXIT_TRANSPORT: i32 = 3;

/// Build an engine over the local catalog described by `env`.
pub fn build_engine(env: &EnvConfig) -> CatalogQueryEngine {
    let catalog = Arc::new(LocalCatalog::new(env.root.clone()));
    CatalogQueryEngine::from_source(catalog, env.engine_config())
}

/// Map a query error to a process exit code.
pub fn exit_code(error: &CatalogError) -> i32 {
    match error {
        CatalogError::Transport(_) => EXIT_TRANSPORT,
        CatalogError::Filter(_) | CatalogError::Evaluation(_) | CatalogError::InvalidConfig(_) => {
            EXIT_USAGE
        }
    }
}
