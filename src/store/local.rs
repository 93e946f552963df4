//! File-backed catalog source.
//!
//! Layout under the catalog root:
//!
//! ```text
//! <root>/<region>/manifest.json                      array of headers
//! <root>/<region>/specs/<model_id>/<version>.json    one detail record
//! ```
//!
//! Path components are validated so a region, identifier or version can
//! never step outside the root. A bad region is fatal; a bad identifier,
//! version or record only affects that entry.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use super::{DetailSource, ManifestSource, TransportError};
use crate::models::{manifest_from_json, ModelHeader, ModelSpecs};

/// Catalog read from a directory tree.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    root: PathBuf,
}

impl LocalCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self, region: &str) -> Result<PathBuf, TransportError> {
        Ok(self.root.join(region_component(region)?).join("manifest.json"))
    }

    pub fn specs_path(
        &self,
        model_id: &str,
        version: &str,
        region: &str,
    ) -> Result<PathBuf, TransportError> {
        let (Some(id_segment), Some(version_segment)) = (component(model_id), component(version))
        else {
            return Err(TransportError::NotFound(format!(
                "no record for {:?}@{:?}",
                model_id, version
            )));
        };
        Ok(self
            .root
            .join(region_component(region)?)
            .join("specs")
            .join(id_segment)
            .join(format!("{}.json", version_segment)))
    }
}

/// `None` for anything that is not a single plain path segment.
fn component(segment: &str) -> Option<&str> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    (!bad).then_some(segment)
}

fn region_component(region: &str) -> Result<&str, TransportError> {
    component(region)
        .ok_or_else(|| TransportError::Fatal(format!("region not allowed: {:?}", region)))
}

async fn read(path: &Path) -> Result<String, TransportError> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TransportError::NotFound(path.display().to_string()),
        _ => TransportError::Unavailable(format!("{}: {}", path.display(), e)),
    })
}

#[async_trait]
impl ManifestSource for LocalCatalog {
    async fn headers(&self, region: &str) -> Result<Vec<ModelHeader>, TransportError> {
        let path = self.manifest_path(region)?;
        let content = read(&path).await?;
        manifest_from_json(&content)
            .map_err(|e| TransportError::Fatal(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl DetailSource for LocalCatalog {
    async fn detail(
        &self,
        model_id: &str,
        version: &str,
        region: &str,
    ) -> Result<ModelSpecs, TransportError> {
        let path = self.specs_path(model_id, version, region)?;
        let content = read(&path).await?;
        let specs = ModelSpecs::from_json(&content).map_err(|e| {
            warn!(path = %path.display(), error = %e, "unreadable detail record");
            TransportError::Unavailable(format!("{}: {}", path.display(), e))
        })?;
        if let Err(e) = specs.ensure_matches(model_id, version) {
            warn!(path = %path.display(), error = %e, "detail record does not match its location");
            return Err(TransportError::Unavailable(e.to_string()));
        }
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_rejects_traversal() {
        assert_eq!(component(".."), None);
        assert_eq!(component("a/b"), None);
        assert_eq!(component("a\\b"), None);
        assert_eq!(component(""), None);
        assert_eq!(component("us-west-2"), Some("us-west-2"));
        assert_eq!(component("1.0.0"), Some("1.0.0"));
    }

    #[test]
    fn test_specs_path_layout() {
        let catalog = LocalCatalog::new("/srv/catalog");
        let path = catalog.specs_path("xgboost-classification-model", "1.0.0", "us-west-2").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/srv/catalog/us-west-2/specs/xgboost-classification-model/1.0.0.json")
        );
    }

    #[tokio::test]
    async fn test_missing_manifest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let result = catalog.headers("us-west-2").await;
        assert!(matches!(result, Err(TransportError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_traversal_region_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let result = catalog.headers("../etc").await;
        assert!(matches!(result, Err(TransportError::Fatal(_))));
        let result = catalog.detail("m", "1.0.0", "..").await;
        assert!(matches!(result, Err(TransportError::Fatal(_))));
    }

    #[tokio::test]
    async fn test_traversal_identifier_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let result = catalog.detail("../../secrets", "1.0.0", "us-west-2").await;
        assert!(matches!(result, Err(TransportError::NotFound(_))));
        let result = catalog.detail("m", "..", "us-west-2").await;
        assert!(matches!(result, Err(TransportError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let specs_dir = dir.path().join("us-west-2").join("specs").join("m");
        std::fs::create_dir_all(&specs_dir).unwrap();
        std::fs::write(specs_dir.join("1.0.0.json"), "{ not json").unwrap();
        let catalog = LocalCatalog::new(dir.path());
        let result = catalog.detail("m", "1.0.0", "us-west-2").await;
        assert!(matches!(result, Err(TransportError::Unavailable(_))));
    }
}
