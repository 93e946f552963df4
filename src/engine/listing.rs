//! Catalog listings built on the query pipeline.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::error::CatalogError;
use super::query::{CatalogQueryEngine, QueryOptions};
use crate::filter::FilterInput;
use crate::models::split_model_id;
use crate::store::DetailStore;

pub const SCRIPT_INFERENCE: &str = "inference";
pub const SCRIPT_TRAINING: &str = "training";

impl CatalogQueryEngine {
    /// Distinct frameworks of matching models, sorted.
    pub async fn list_frameworks(
        &self,
        filter: impl Into<FilterInput>,
        region: Option<&str>,
    ) -> Result<Vec<String>, CatalogError> {
        self.list_id_segment(filter.into(), region, |(framework, _, _)| framework).await
    }

    /// Distinct tasks of matching models, sorted.
    pub async fn list_tasks(
        &self,
        filter: impl Into<FilterInput>,
        region: Option<&str>,
    ) -> Result<Vec<String>, CatalogError> {
        self.list_id_segment(filter.into(), region, |(_, task, _)| task).await
    }

    /// Script scopes available across matching models.
    pub async fn list_scripts(
        &self,
        filter: impl Into<FilterInput>,
        region: Option<&str>,
    ) -> Result<Vec<String>, CatalogError> {
        let filter = filter.into();
        if filter.is_always_true() {
            return Ok(vec![SCRIPT_INFERENCE.to_string(), SCRIPT_TRAINING.to_string()]);
        }

        let matched = self.matching_entries(listing_options(filter, region)).await?;
        let mut scripts = BTreeSet::new();
        for (model_id, version) in &matched.pairs {
            scripts.insert(SCRIPT_INFERENCE);
            if supports_training(&matched.details, model_id, version, &matched.region).await? {
                scripts.insert(SCRIPT_TRAINING);
            }
            if scripts.len() == 2 {
                break;
            }
        }
        Ok(scripts.into_iter().map(String::from).collect())
    }

    /// URL recorded in the detail record of one model version.
    pub async fn model_url(
        &self,
        model_id: &str,
        version: &str,
        region: Option<&str>,
    ) -> Result<Option<String>, CatalogError> {
        self.config().validate()?;
        let region = region.unwrap_or(&self.config().default_region);
        let details = DetailStore::new(self.detail_source());
        let specs = details.detail(model_id, version, region).await?;
        Ok(specs.url.clone().filter(|url| !url.is_empty()))
    }

    async fn list_id_segment<F>(
        &self,
        filter: FilterInput,
        region: Option<&str>,
        pick: F,
    ) -> Result<Vec<String>, CatalogError>
    where
        F: for<'s> Fn((&'s str, &'s str, &'s str)) -> &'s str,
    {
        let matched = self.matching_entries(listing_options(filter, region)).await?;
        let mut values = BTreeSet::new();
        for (model_id, _) in &matched.pairs {
            match split_model_id(model_id) {
                Some(parts) => {
                    values.insert(pick(parts).to_string());
                }
                None => debug!(model_id = %model_id, "identifier has no framework-task prefix"),
            }
        }
        Ok(values.into_iter().collect())
    }
}

fn listing_options(filter: FilterInput, region: Option<&str>) -> QueryOptions {
    let options = QueryOptions::new().filter(filter).list_versions(true);
    match region {
        Some(region) => options.region(region),
        None => options,
    }
}

async fn supports_training(
    details: &DetailStore,
    model_id: &str,
    version: &str,
    region: &str,
) -> Result<bool, CatalogError> {
    match details.detail(model_id, version, region).await {
        Ok(specs) => Ok(specs.training_supported),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            warn!(model_id, version, error = %e, "skipping training scope check");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::models::{ModelHeader, ModelSpecs};
    use crate::store::StaticCatalog;
    use std::sync::Arc;

    const REGION: &str = "us-west-2";

    fn catalog() -> Arc<StaticCatalog> {
        let catalog = StaticCatalog::new();
        let entries = [
            ("pytorch-ic-mobilenet", "1.0.0", false),
            ("pytorch-od-ssd", "2.1.0", true),
            ("xgboost-classification-model", "1.0.0", false),
        ];
        for (id, version, training) in entries {
            let mut specs = ModelSpecs::new(id, version);
            specs.training_supported = training;
            specs.url = Some(format!("https://models.example/{}", id));
            catalog.insert_entry(REGION, ModelHeader::new(id, version), specs);
        }
        Arc::new(catalog)
    }

    fn engine(catalog: &Arc<StaticCatalog>) -> CatalogQueryEngine {
        CatalogQueryEngine::from_source(Arc::clone(catalog), EngineConfig::for_sdk("1.0.0"))
    }

    #[tokio::test]
    async fn test_frameworks_and_tasks() {
        let catalog = catalog();
        let engine = engine(&catalog);
        assert_eq!(
            engine.list_frameworks("true", None).await.unwrap(),
            vec!["pytorch", "xgboost"]
        );
        assert_eq!(
            engine.list_tasks("framework == pytorch", None).await.unwrap(),
            vec!["ic", "od"]
        );
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_scripts_trivial_filter_skips_catalog() {
        let catalog = catalog();
        let scripts = engine(&catalog).list_scripts("TRUE", None).await.unwrap();
        assert_eq!(scripts, vec!["inference", "training"]);
        assert_eq!(catalog.manifest_calls(), 0);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_scripts_from_matches() {
        let catalog = catalog();
        let engine = engine(&catalog);
        assert_eq!(
            engine.list_scripts("task == ic", None).await.unwrap(),
            vec!["inference"]
        );
        assert_eq!(
            engine.list_scripts("framework == pytorch", None).await.unwrap(),
            vec!["inference", "training"]
        );
        assert!(engine
            .list_scripts("framework == tensorflow", None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_model_url() {
        let catalog = catalog();
        let engine = engine(&catalog);
        assert_eq!(
            engine.model_url("pytorch-od-ssd", "2.1.0", Some(REGION)).await.unwrap(),
            Some("https://models.example/pytorch-od-ssd".to_string())
        );
        assert!(engine.model_url("missing", "1.0.0", None).await.is_err());
    }
}
