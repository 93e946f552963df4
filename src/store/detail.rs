//! Per-query memoized detail fetches.
//!
//! Uses DashMap for lock-free concurrent access. Each key owns a
//! `OnceCell`, so concurrent requests for the same entry join one in-flight
//! fetch instead of issuing duplicates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::debug;

use super::{DetailSource, TransportError};
use crate::models::ModelSpecs;
use crate::telemetry;

/// Cache key: (model_id, version, region).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub model_id: String,
    pub version: String,
    pub region: String,
}

impl DetailKey {
    pub fn new(model_id: &str, version: &str, region: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            version: version.to_string(),
            region: region.to_string(),
        }
    }
}

/// Detail tier wrapper, created fresh for every query invocation.
pub struct DetailStore {
    source: Arc<dyn DetailSource>,
    entries: DashMap<DetailKey, Arc<OnceCell<Arc<ModelSpecs>>>>,
    fetches: AtomicUsize,
}

impl DetailStore {
    pub fn new(source: Arc<dyn DetailSource>) -> Self {
        Self {
            source,
            entries: DashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Get the detail record, fetching at most once per key.
    ///
    /// Failed fetches are not cached; a later request retries.
    pub async fn detail(
        &self,
        model_id: &str,
        version: &str,
        region: &str,
    ) -> Result<Arc<ModelSpecs>, TransportError> {
        let key = DetailKey::new(model_id, version, region);
        // Clone the cell out so no shard lock is held across the await.
        let cell = Arc::clone(&*self.entries.entry(key).or_default());

        let specs = cell
            .get_or_try_init(|| async {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                telemetry::record_detail_fetch(region);
                debug!(model_id, version, region, "fetching detail record");
                self.source.detail(model_id, version, region).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(specs))
    }

    /// Number of source calls issued by this store.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Number of keys with a cached record.
    pub fn cached_len(&self) -> usize {
        self.entries.iter().filter(|e| e.value().initialized()).count()
    }
}
