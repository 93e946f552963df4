//! Header tier access.

use std::sync::Arc;

use tracing::debug;

use super::{ManifestSource, TransportError};
use crate::models::ModelHeader;
use crate::telemetry;

/// Thin wrapper over a [`ManifestSource`].
///
/// Every call reaches the source; caching, if any, belongs to the source.
#[derive(Clone)]
pub struct HeaderStore {
    source: Arc<dyn ManifestSource>,
}

impl HeaderStore {
    pub fn new(source: Arc<dyn ManifestSource>) -> Self {
        Self { source }
    }

    /// Fetch all headers for `region` in manifest order.
    pub async fn headers(&self, region: &str) -> Result<Vec<ModelHeader>, TransportError> {
        let headers = self.source.headers(region).await?;
        telemetry::record_manifest_fetch(region, headers.len());
        debug!(region, count = headers.len(), "fetched catalog manifest");
        Ok(headers)
    }
}
