//! Query throughput benchmarks.
//!
//! Runs full queries over an in-memory catalog, with and without detail
//! fetches.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gg_catalog::{
    CatalogQueryEngine, EngineConfig, ModelHeader, ModelSpecs, QueryOptions, StaticCatalog,
};

const REGION: &str = "us-west-2";
const FRAMEWORKS: [&str; 4] = ["pytorch", "tensorflow", "huggingface", "xgboost"];

fn build_catalog(models: usize, flags_in_manifest: bool) -> Arc<StaticCatalog> {
    let catalog = StaticCatalog::new();
    for i in 0..models {
        let framework = FRAMEWORKS[i % FRAMEWORKS.len()];
        let model_id = format!("{}-ic-model{}", framework, i / 3);
        let version = format!("1.{}.0", i % 3);
        let mut header = ModelHeader::new(&model_id, &version);
        if flags_in_manifest {
            header.deprecated = Some(false);
            header.inference_vulnerable = Some(false);
            header.training_vulnerable = Some(false);
        }
        let mut specs = ModelSpecs::new(&model_id, &version);
        specs.framework = framework.to_string();
        specs.training_supported = i % 2 == 0;
        catalog.insert_entry(REGION, header, specs);
    }
    Arc::new(catalog)
}

fn bench_query(c: &mut Criterion) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => panic!("tokio runtime: {}", e),
    };
    let mut group = c.benchmark_group("catalog_query");

    for size in [100usize, 1_000] {
        for (name, flags, filter) in [
            ("header_only", true, "task == ic"),
            ("detail", false, "training_supported == true"),
        ] {
            let catalog = build_catalog(size, flags);
            let engine = CatalogQueryEngine::from_source(catalog, EngineConfig::for_sdk("1.0.0"));
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &engine, |b, engine| {
                b.iter(|| {
                    let options = QueryOptions::new()
                        .filter(black_box(filter))
                        .list_versions(true);
                    rt.block_on(engine.query(options))
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
