//! Resolved attribute values and literal comparison.

use std::fmt;

use serde_json::Value;

use super::truth::Truth;

/// A comparable attribute value taken from a header or detail record.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    Num(f64),
}

impl AttrValue {
    /// Convert a JSON scalar. Objects, arrays and null have no comparable value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Num),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Compare against a filter literal.
    ///
    /// Booleans match `true`/`false` in any case, numbers match numeric
    /// literals, strings match exactly. A literal of the wrong type is
    /// `Unknown`.
    pub fn equals_literal(&self, literal: &str) -> Truth {
        match self {
            Self::Str(s) => Truth::from(s == literal),
            Self::Bool(b) => match Truth::parse_literal(literal) {
                Some(Truth::True) => Truth::from(*b),
                Some(Truth::False) => Truth::from(!*b),
                _ => Truth::Unknown,
            },
            Self::Num(n) => match literal.trim().parse::<f64>() {
                Ok(lit) => Truth::from(*n == lit),
                Err(_) => Truth::Unknown,
            },
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Num(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literal_any_case() {
        let v = AttrValue::Bool(false);
        assert_eq!(v.equals_literal("falSE"), Truth::True);
        assert_eq!(v.equals_literal("True"), Truth::False);
        assert_eq!(v.equals_literal("tensorflow"), Truth::Unknown);
    }

    #[test]
    fn test_string_exact() {
        let v = AttrValue::Str("ic".into());
        assert_eq!(v.equals_literal("ic"), Truth::True);
        assert_eq!(v.equals_literal("IC"), Truth::False);
    }

    #[test]
    fn test_number_literal() {
        let v = AttrValue::Num(3.0);
        assert_eq!(v.equals_literal("3"), Truth::True);
        assert_eq!(v.equals_literal("3.5"), Truth::False);
        assert_eq!(v.equals_literal("three"), Truth::Unknown);
    }
}
