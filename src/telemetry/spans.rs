//! Span utilities and extension traits for query tracing.

use tracing::{info_span, Span};
use uuid::Uuid;

/// Extension trait for adding context to spans.
pub trait SpanExt {
    /// Record the result of an operation into the span.
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display;
}

impl SpanExt for Span {
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(_) => {
                self.record("status", "ok");
            }
            Err(e) => {
                self.record("status", "error");
                self.record("error.message", e.to_string().as_str());
            }
        }
    }
}

/// Factory for creating standardized query spans.
pub struct QuerySpan;

impl QuerySpan {
    /// Create a new query span with standard fields.
    ///
    /// Fields included:
    /// - `query_id`: Unique identifier for the query
    /// - `region`: Catalog region being queried
    /// - `filter`: Display form of the user filter
    /// - `status`: To be filled in by `SpanExt::record_result`
    /// - `error.message`: To be filled in on error
    /// - `matched`, `detail_fetches`, `latency_ms`: filled in after completion
    pub fn new(region: &str, filter: &str) -> Span {
        let query_id = Uuid::new_v4();
        info_span!(
            "catalog_query",
            query_id = %query_id,
            region = %region,
            filter = %filter,
            status = tracing::field::Empty,
            error.message = tracing::field::Empty,
            matched = tracing::field::Empty,
            detail_fetches = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        )
    }
}
