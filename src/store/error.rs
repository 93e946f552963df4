//! Transport errors raised by catalog sources.

use thiserror::Error;

/// Failure reported by a manifest or detail source.
///
/// Only `Fatal` aborts a query when raised by a detail fetch; the other
/// variants exclude the affected entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Catalog source unavailable: {0}")]
    Unavailable(String),

    #[error("Catalog entry not found: {0}")]
    NotFound(String),

    #[error("Catalog source fault: {0}")]
    Fatal(String),
}

impl TransportError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}
