//! Catalog query engine.
//!
//! Combines the default exclusions with the caller's filter, evaluates it
//! per catalog entry with cost-tiered attribute resolution, and selects and
//! orders the surviving versions.

pub mod config;
pub mod defaults;
pub mod error;
pub mod resolver;

mod evaluator;
mod listing;
mod query;
mod selection;

pub use config::{EngineConfig, DEFAULT_REGION, MAX_CONCURRENT_FETCHES_CAP};
pub use defaults::{
    with_default_exclusions, EffectiveFilter, DEFAULT_EXCLUSIONS, DEFERRED_EXCLUSIONS,
};
pub use error::CatalogError;
pub use evaluator::Evaluator;
pub use listing::{SCRIPT_INFERENCE, SCRIPT_TRAINING};
pub use query::{CatalogQueryEngine, QueryOptions, QueryPhase, QueryResult};
pub use resolver::{HeaderResolver, Resolution};
pub use selection::select_versions;
