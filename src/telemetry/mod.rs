//! Telemetry for catalog queries.
//!
//! Provides structured logging, query spans, and metrics collection.

mod logging;
mod metrics;
mod spans;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use self::metrics::{
    record_detail_fetch, record_entry_excluded, record_manifest_fetch, record_query_failure,
    record_query_success,
};
pub use spans::{QuerySpan, SpanExt};
