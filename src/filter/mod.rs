//! Filter expressions for catalog queries.
//!
//! Filters are trees of predicates and Kleene connectives, evaluated to a
//! three-valued [`Truth`]. Textual predicates are parsed once into the tree
//! before evaluation.

mod error;
mod expr;
mod parser;
mod truth;
mod value;

pub use error::FilterError;
pub use expr::{Expr, Operand, Operator, Predicate};
pub use parser::{parse_filter, parse_predicate};
pub use truth::Truth;
pub use value::AttrValue;

/// A filter as supplied by a caller: text to parse, or a prebuilt tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    Text(String),
    Tree(Expr),
}

impl FilterInput {
    /// Parse (if needed) and validate into an expression tree.
    pub fn into_expr(self) -> Result<Expr, FilterError> {
        let expr = match self {
            Self::Text(text) => parse_filter(&text)?,
            Self::Tree(expr) => expr,
        };
        expr.validate()?;
        Ok(expr)
    }

    pub fn is_always_true(&self) -> bool {
        match self {
            Self::Text(text) => Truth::parse_literal(text) == Some(Truth::True),
            Self::Tree(expr) => expr.is_always_true(),
        }
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::Tree(Expr::always())
    }
}

impl From<&str> for FilterInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FilterInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Expr> for FilterInput {
    fn from(expr: Expr) -> Self {
        Self::Tree(expr)
    }
}
