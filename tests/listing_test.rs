//! Tests for framework, task, script and URL listings.

mod common;

use common::{catalog, engine, REGION};
use gg_catalog::engine::CatalogError;
use gg_catalog::TransportError;

#[tokio::test]
async fn test_list_scripts_trivial_filter() {
    let catalog = catalog(true);
    let scripts = engine(&catalog).list_scripts("true", None).await.unwrap();
    assert_eq!(scripts, vec!["inference", "training"]);
    assert_eq!(catalog.manifest_calls(), 0);
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn test_list_scripts_stops_once_complete() {
    let catalog = catalog(true);
    let scripts = engine(&catalog)
        .list_scripts("framework == huggingface", None)
        .await
        .unwrap();
    assert_eq!(scripts, vec!["inference", "training"]);
    assert_eq!(catalog.manifest_calls(), 1);
    assert_eq!(catalog.detail_calls(), 1);
}

#[tokio::test]
async fn test_list_scripts_inference_only() {
    let catalog = catalog(true);
    let scripts = engine(&catalog)
        .list_scripts("framework == tensorflow", None)
        .await
        .unwrap();
    assert_eq!(scripts, vec!["inference"]);
}

#[tokio::test]
async fn test_list_scripts_no_match() {
    let catalog = catalog(true);
    let scripts = engine(&catalog).list_scripts("task == od", None).await.unwrap();
    assert!(scripts.is_empty());
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn test_list_tasks() {
    let catalog = catalog(true);
    let engine = engine(&catalog);
    assert_eq!(
        engine.list_tasks("true", None).await.unwrap(),
        vec!["classification", "ic", "spc"]
    );
    assert_eq!(
        engine.list_tasks("framework == pytorch", None).await.unwrap(),
        vec!["ic"]
    );
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn test_list_frameworks() {
    let catalog = catalog(true);
    let engine = engine(&catalog);
    assert_eq!(
        engine.list_frameworks("true", None).await.unwrap(),
        vec!["huggingface", "pytorch", "tensorflow", "xgboost"]
    );
    assert_eq!(
        engine.list_frameworks("task == ic", None).await.unwrap(),
        vec!["pytorch", "tensorflow"]
    );
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn test_listings_over_deprecated_specs_need_no_fetch() {
    let catalog = catalog(false);
    catalog.update_specs(|specs| specs.deprecated = true);
    let engine = engine(&catalog);
    assert_eq!(
        engine.list_tasks("true", None).await.unwrap(),
        vec!["classification", "ic", "spc"]
    );
    assert_eq!(
        engine.list_frameworks("true", None).await.unwrap(),
        vec!["huggingface", "pytorch", "tensorflow", "xgboost"]
    );
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn test_listing_region_passthrough() {
    let catalog = catalog(true);
    let frameworks = engine(&catalog)
        .list_frameworks("true", Some("ap-south-1"))
        .await
        .unwrap();
    assert!(frameworks.is_empty());
    assert_eq!(catalog.manifest_regions(), vec!["ap-south-1".to_string()]);
}

#[tokio::test]
async fn test_model_url() {
    let catalog = catalog(true);
    let engine = engine(&catalog);
    let url = engine
        .model_url("xgboost-classification-model", "1.1.0", Some(REGION))
        .await
        .unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://models.example/xgboost-classification-model/1.1.0")
    );
    assert_eq!(catalog.detail_calls(), 1);
}

#[tokio::test]
async fn test_model_url_missing_entry() {
    let catalog = catalog(true);
    let err = engine(&catalog)
        .model_url("pytorch-od-ssd", "1.0.0", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Transport(TransportError::NotFound(_))));
}
