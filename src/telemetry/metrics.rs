//! Query metrics via the `metrics` facade.
//!
//! Without an installed recorder these calls are no-ops.

use ::metrics::{counter, histogram};

pub fn record_manifest_fetch(region: &str, headers: usize) {
    counter!("catalog_manifest_fetches_total", "region" => region.to_string()).increment(1);
    histogram!("catalog_manifest_size").record(headers as f64);
}

pub fn record_detail_fetch(region: &str) {
    counter!("catalog_detail_fetches_total", "region" => region.to_string()).increment(1);
}

pub fn record_query_success(matched: usize, evaluated: usize, latency_ms: f64) {
    counter!("catalog_queries_total", "status" => "ok").increment(1);
    counter!("catalog_entries_evaluated_total").increment(evaluated as u64);
    histogram!("catalog_query_matches").record(matched as f64);
    histogram!("catalog_query_latency_ms").record(latency_ms);
}

pub fn record_query_failure(reason: &'static str) {
    counter!("catalog_queries_total", "status" => "error", "reason" => reason).increment(1);
}

pub fn record_entry_excluded(reason: &'static str) {
    counter!("catalog_entries_excluded_total", "reason" => reason).increment(1);
}
