//! Shared catalog fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use gg_catalog::{CatalogQueryEngine, EngineConfig, ModelHeader, ModelSpecs, StaticCatalog};

pub const REGION: &str = "us-west-2";

/// One fixture entry: id, version, framework, task, training_supported.
pub struct Entry {
    pub model_id: &'static str,
    pub version: &'static str,
    pub framework: &'static str,
    pub task: &'static str,
    pub training_supported: bool,
}

pub const ENTRIES: &[Entry] = &[
    Entry {
        model_id: "huggingface-spc-bert-base-cased",
        version: "1.0.0",
        framework: "huggingface",
        task: "spc",
        training_supported: true,
    },
    Entry {
        model_id: "pytorch-ic-mobilenet-v2",
        version: "1.0.0",
        framework: "pytorch",
        task: "ic",
        training_supported: false,
    },
    Entry {
        model_id: "pytorch-ic-mobilenet-v2",
        version: "2.0.0",
        framework: "pytorch",
        task: "ic",
        training_supported: true,
    },
    Entry {
        model_id: "tensorflow-ic-bit-m-r101x1-ilsvrc2012-classification-1",
        version: "1.0.0",
        framework: "tensorflow",
        task: "ic",
        training_supported: false,
    },
    Entry {
        model_id: "xgboost-classification-model",
        version: "1.0.0",
        framework: "xgboost",
        task: "classification",
        training_supported: true,
    },
    Entry {
        model_id: "xgboost-classification-model",
        version: "1.1.0",
        framework: "xgboost",
        task: "classification",
        training_supported: true,
    },
];

pub fn specs_for(entry: &Entry) -> ModelSpecs {
    let mut specs = ModelSpecs::new(entry.model_id, entry.version);
    specs.framework = entry.framework.to_string();
    specs.task = entry.task.to_string();
    specs.training_supported = entry.training_supported;
    specs.min_sdk_version = "1.0.0".to_string();
    specs.url = Some(format!("https://models.example/{}/{}", entry.model_id, entry.version));
    specs
}

/// Fixture catalog. With `flags_in_manifest` every header carries the
/// deprecated/vulnerable flags, so default exclusions resolve without fetches.
pub fn catalog(flags_in_manifest: bool) -> Arc<StaticCatalog> {
    let catalog = StaticCatalog::new();
    for entry in ENTRIES {
        let mut header = ModelHeader::new(entry.model_id, entry.version).with_min_version("1.0.0");
        if flags_in_manifest {
            header.deprecated = Some(false);
            header.inference_vulnerable = Some(false);
            header.training_vulnerable = Some(false);
        }
        catalog.insert_entry(REGION, header, specs_for(entry));
    }
    Arc::new(catalog)
}

/// Minimal two-identifier catalog: (A,1.0.0), (A,2.0.0), (B,1.0.0).
pub fn ab_catalog() -> Arc<StaticCatalog> {
    let catalog = StaticCatalog::new();
    for (id, version, framework) in [("A", "1.0.0", "pytorch"), ("A", "2.0.0", "pytorch"), ("B", "1.0.0", "xgboost")] {
        let mut specs = ModelSpecs::new(id, version);
        specs.framework = framework.to_string();
        specs.task = "classification".to_string();
        catalog.insert_entry(REGION, ModelHeader::new(id, version), specs);
    }
    Arc::new(catalog)
}

pub fn engine(catalog: &Arc<StaticCatalog>) -> CatalogQueryEngine {
    engine_with_sdk(catalog, "2.0.0")
}

pub fn engine_with_sdk(catalog: &Arc<StaticCatalog>, sdk: &str) -> CatalogQueryEngine {
    CatalogQueryEngine::from_source(Arc::clone(catalog), EngineConfig::for_sdk(sdk))
}

pub fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter().map(|(id, v)| (id.to_string(), v.to_string())).collect()
}
