//! GG-CATALOG
//!
//! Tri-state filter queries over a versioned model catalog.
//!
//! # Design Principles
//!
//! - **Three-valued**: filters evaluate to `True`, `False` or `Unknown`;
//!   only `True` keeps an entry.
//! - **Cost-tiered**: the manifest header answers what it can; the detail
//!   record is fetched only when the header cannot decide, at most once per
//!   entry and query.
//! - **Safe by default**: deprecated, vulnerable and unsupported models are
//!   hidden unless the filter names that attribute.
//!
//! # Data Flow
//!
//! - `store`: manifest and detail transports behind two traits
//! - `filter`: expression tree, parser, Kleene logic
//! - `engine`: default exclusions, evaluation, version selection
//! - `cli`, `config`, `telemetry`: the command-line surface

pub mod cli;
pub mod config;
pub mod engine;
pub mod filter;
pub mod models;
pub mod store;
pub mod telemetry;

pub use engine::{CatalogError, CatalogQueryEngine, EngineConfig, QueryOptions, QueryResult};
pub use filter::{Expr, FilterError, FilterInput, Operand, Operator, Predicate, Truth};
pub use models::{ModelHeader, ModelSpecs, ModelVersion};
pub use store::{DetailSource, LocalCatalog, ManifestSource, StaticCatalog, TransportError};
