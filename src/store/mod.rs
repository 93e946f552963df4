//! Catalog data access.
//!
//! The engine reaches the catalog only through two collaborator traits:
//! [`ManifestSource`] for the cheap header tier and [`DetailSource`] for the
//! per-entry detail tier. [`HeaderStore`] and [`DetailStore`] wrap them with
//! the engine's logging, metrics and per-query memoization.

mod detail;
mod error;
mod header;
mod local;
mod memory;

use async_trait::async_trait;

use crate::models::{ModelHeader, ModelSpecs};

pub use detail::{DetailKey, DetailStore};
pub use error::TransportError;
pub use header::HeaderStore;
pub use local::LocalCatalog;
pub use memory::StaticCatalog;

/// Manifest transport: one lightweight header per catalog entry.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn headers(&self, region: &str) -> Result<Vec<ModelHeader>, TransportError>;
}

/// Detail transport: the full record for one entry.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn detail(
        &self,
        model_id: &str,
        version: &str,
        region: &str,
    ) -> Result<ModelSpecs, TransportError>;
}
