//! Filter construction errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Malformed filter: {0}")]
    Parse(String),

    #[error("No support for multiple level metadata indexing ('{0}')")]
    NotSupported(String),

    #[error("{0} requires at least one operand")]
    EmptyCombinator(&'static str),
}
