//! Query error types.
//!
//! `Unknown` evaluation results are values, not errors: a query whose
//! entries all evaluate `Unknown` returns an empty result.

use thiserror::Error;

use crate::filter::FilterError;
use crate::store::TransportError;

/// Errors that abort a catalog query.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Filter(FilterError::NotSupported(_)) => "not_supported",
            Self::Filter(_) => "filter",
            Self::Evaluation(_) => "evaluation",
            Self::InvalidConfig(_) => "config",
        }
    }

    /// Returns true if the caller supplied a bad filter or configuration.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Filter(_) | Self::InvalidConfig(_))
    }
}
