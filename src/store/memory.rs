//! In-memory catalog source.
//!
//! Backs tests, benchmarks and embedders that already hold the catalog in
//! memory. Counts calls so callers can observe how many fetches a query
//! cost, and supports injected failures and latency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{DetailKey, DetailSource, ManifestSource, TransportError};
use crate::models::{ModelHeader, ModelSpecs};

/// Thread-safe in-memory manifest and detail source.
#[derive(Default)]
pub struct StaticCatalog {
    manifests: RwLock<HashMap<String, Vec<ModelHeader>>>,
    specs: RwLock<HashMap<DetailKey, ModelSpecs>>,
    failures: RwLock<HashMap<(String, String), TransportError>>,
    manifest_failure: RwLock<Option<TransportError>>,
    manifest_regions: RwLock<Vec<String>>,
    detail_latency: Option<Duration>,
    manifest_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every detail fetch, to exercise concurrent callers.
    pub fn with_detail_latency(mut self, latency: Duration) -> Self {
        self.detail_latency = Some(latency);
        self
    }

    pub fn insert_header(&self, region: &str, header: ModelHeader) {
        self.manifests
            .write()
            .entry(region.to_string())
            .or_default()
            .push(header);
    }

    pub fn insert_specs(&self, region: &str, specs: ModelSpecs) {
        let key = DetailKey::new(&specs.model_id, &specs.version, region);
        self.specs.write().insert(key, specs);
    }

    /// Insert a header together with its detail record.
    pub fn insert_entry(&self, region: &str, header: ModelHeader, specs: ModelSpecs) {
        self.insert_header(region, header);
        self.insert_specs(region, specs);
    }

    /// Apply `update` to every stored detail record.
    pub fn update_specs<F: FnMut(&mut ModelSpecs)>(&self, mut update: F) {
        for specs in self.specs.write().values_mut() {
            update(specs);
        }
    }

    /// Make detail fetches for (model_id, version) fail with `error`.
    pub fn fail_detail(&self, model_id: &str, version: &str, error: TransportError) {
        self.failures
            .write()
            .insert((model_id.to_string(), version.to_string()), error);
    }

    /// Make manifest fetches fail with `error`.
    pub fn fail_manifest(&self, error: TransportError) {
        *self.manifest_failure.write() = Some(error);
    }

    pub fn clear_failures(&self) {
        self.failures.write().clear();
        *self.manifest_failure.write() = None;
    }

    pub fn manifest_calls(&self) -> usize {
        self.manifest_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Regions requested from the manifest source, in call order.
    pub fn manifest_regions(&self) -> Vec<String> {
        self.manifest_regions.read().clone()
    }

    pub fn reset_counters(&self) {
        self.manifest_calls.store(0, Ordering::SeqCst);
        self.detail_calls.store(0, Ordering::SeqCst);
        self.manifest_regions.write().clear();
    }
}

#[async_trait]
impl ManifestSource for StaticCatalog {
    async fn headers(&self, region: &str) -> Result<Vec<ModelHeader>, TransportError> {
        self.manifest_calls.fetch_add(1, Ordering::SeqCst);
        self.manifest_regions.write().push(region.to_string());
        if let Some(error) = self.manifest_failure.read().clone() {
            return Err(error);
        }
        Ok(self.manifests.read().get(region).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl DetailSource for StaticCatalog {
    async fn detail(
        &self,
        model_id: &str,
        version: &str,
        region: &str,
    ) -> Result<ModelSpecs, TransportError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.detail_latency {
            tokio::time::sleep(latency).await;
        }
        let injected = self
            .failures
            .read()
            .get(&(model_id.to_string(), version.to_string()))
            .cloned();
        if let Some(error) = injected {
            return Err(error);
        }
        self.specs
            .read()
            .get(&DetailKey::new(model_id, version, region))
            .cloned()
            .ok_or_else(|| {
                TransportError::NotFound(format!("{}@{} in {}", model_id, version, region))
            })
    }
}
