//! Filter expression tree.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::FilterError;
use super::parser;
use super::truth::Truth;
use super::value::AttrValue;

/// Comparison operator of a predicate.
///
/// `is` and `equals` parse to `Equals`, `is not` parses to `NotEquals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
}

impl Operator {
    pub fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    fn negated(self) -> bool {
        matches!(self, Self::NotEquals | Self::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::In => "in",
            Self::NotIn => "not in",
        })
    }
}

/// Right-hand side of a predicate.
///
/// `Unknown` is the bare `unknown` token; a quoted `"unknown"` is text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Unknown,
    Value(String),
}

impl Operand {
    fn matches(&self, value: &AttrValue) -> Truth {
        match self {
            Self::Unknown => Truth::Unknown,
            Self::Value(literal) => value.equals_literal(literal),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Value(v) if needs_quotes(v) => write!(f, "\"{}\"", v),
            Self::Value(v) => f.write_str(v),
        }
    }
}

fn needs_quotes(v: &str) -> bool {
    v.is_empty()
        || v.eq_ignore_ascii_case("unknown")
        || v.starts_with(['\'', '"'])
        || v.contains(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
}

/// Leaf comparison: `<attribute> <operator> <operands>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    attribute: String,
    operator: Operator,
    operands: Vec<Operand>,
}

impl Predicate {
    pub fn new(
        attribute: impl Into<String>,
        operator: Operator,
        operands: Vec<Operand>,
    ) -> Result<Self, FilterError> {
        let attribute = attribute.into();
        check_attribute(&attribute)?;
        if !operator.takes_list() && operands.len() != 1 {
            return Err(FilterError::Parse(format!(
                "operator '{}' takes exactly one value, got {}",
                operator,
                operands.len()
            )));
        }
        Ok(Self { attribute, operator, operands })
    }

    /// `attribute == <bool>`, used for built-in flag predicates.
    pub(crate) fn flag(attribute: &str, value: bool) -> Self {
        Self {
            attribute: attribute.to_string(),
            operator: Operator::Equals,
            operands: vec![Operand::Value(value.to_string())],
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// True when the outcome is `Unknown` whatever the attribute resolves to:
    /// any comparison against the `unknown` literal, list members included.
    pub fn is_indeterminate(&self) -> bool {
        self.operands.contains(&Operand::Unknown)
    }

    /// Apply the predicate to a resolved value; `None` means unresolved.
    pub fn test(&self, value: Option<&AttrValue>) -> Truth {
        let Some(value) = value else {
            return Truth::Unknown;
        };
        if self.is_indeterminate() {
            return Truth::Unknown;
        }
        let hit = Truth::any(self.operands.iter().map(|o| o.matches(value)));
        if self.operator.negated() {
            !hit
        } else {
            hit
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.attribute, self.operator)?;
        if self.operator.takes_list() {
            f.write_str("[")?;
            for (i, operand) in self.operands.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", operand)?;
            }
            f.write_str("]")
        } else {
            write!(f, "{}", self.operands[0])
        }
    }
}

/// Reject attribute names the engine cannot address.
pub(crate) fn check_attribute(attribute: &str) -> Result<(), FilterError> {
    if attribute.is_empty() {
        return Err(FilterError::Parse("empty attribute name".into()));
    }
    if attribute.contains('.') {
        return Err(FilterError::NotSupported(attribute.to_string()));
    }
    Ok(())
}

/// Filter expression.
///
/// `And` and `Or` hold at least one child when built through
/// [`Expr::and`] / [`Expr::or`]; [`Expr::validate`] re-checks trees built
/// from the variants directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Truth),
    Predicate(Predicate),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    Identity(Box<Expr>),
}

impl Expr {
    /// The always-true filter.
    pub fn always() -> Self {
        Self::Constant(Truth::True)
    }

    pub fn parse(text: &str) -> Result<Self, FilterError> {
        parser::parse_filter(text)
    }

    pub fn predicate(
        attribute: impl Into<String>,
        operator: Operator,
        operands: Vec<Operand>,
    ) -> Result<Self, FilterError> {
        Predicate::new(attribute, operator, operands).map(Self::Predicate)
    }

    pub fn and(children: Vec<Expr>) -> Result<Self, FilterError> {
        if children.is_empty() {
            return Err(FilterError::EmptyCombinator("And"));
        }
        Ok(Self::And(children))
    }

    pub fn or(children: Vec<Expr>) -> Result<Self, FilterError> {
        if children.is_empty() {
            return Err(FilterError::EmptyCombinator("Or"));
        }
        Ok(Self::Or(children))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Expr) -> Self {
        Self::Not(Box::new(child))
    }

    pub fn identity(child: Expr) -> Self {
        Self::Identity(Box::new(child))
    }

    /// True for the bare always-true constant (optionally wrapped in `Identity`).
    pub fn is_always_true(&self) -> bool {
        match self {
            Self::Constant(Truth::True) => true,
            Self::Identity(inner) => inner.is_always_true(),
            _ => false,
        }
    }

    /// Check structural invariants of a tree that may not have come from
    /// the parser or the checked constructors.
    pub fn validate(&self) -> Result<(), FilterError> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Predicate(p) => check_attribute(p.attribute()),
            Self::And(children) | Self::Or(children) => {
                if children.is_empty() {
                    let name = if matches!(self, Self::And(_)) { "And" } else { "Or" };
                    return Err(FilterError::EmptyCombinator(name));
                }
                children.iter().try_for_each(Expr::validate)
            }
            Self::Not(child) | Self::Identity(child) => child.validate(),
        }
    }

    /// Every attribute name mentioned anywhere in the tree.
    pub fn attributes(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Constant(_) => {}
            Self::Predicate(p) => {
                out.insert(p.attribute());
            }
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_attributes(out);
                }
            }
            Self::Not(child) | Self::Identity(child) => child.collect_attributes(out),
        }
    }

    pub fn mentions(&self, attribute: &str) -> bool {
        match self {
            Self::Constant(_) => false,
            Self::Predicate(p) => p.attribute() == attribute,
            Self::And(children) | Self::Or(children) => {
                children.iter().any(|c| c.mentions(attribute))
            }
            Self::Not(child) | Self::Identity(child) => child.mentions(attribute),
        }
    }

    /// Evaluate against a synchronous attribute lookup, short-circuiting
    /// left to right.
    pub fn evaluate<F>(&self, lookup: &F) -> Truth
    where
        F: Fn(&str) -> Option<AttrValue>,
    {
        match self {
            Self::Constant(t) => *t,
            Self::Predicate(p) => {
                if p.is_indeterminate() {
                    return Truth::Unknown;
                }
                p.test(lookup(p.attribute()).as_ref())
            }
            Self::And(children) => Truth::all(children.iter().map(|c| c.evaluate(lookup))),
            Self::Or(children) => Truth::any(children.iter().map(|c| c.evaluate(lookup))),
            Self::Not(child) => !child.evaluate(lookup),
            Self::Identity(child) => child.evaluate(lookup),
        }
    }
}

impl FromStr for Expr {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_filter(s)
    }
}

impl TryFrom<&str> for Expr {
    type Error = FilterError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parser::parse_filter(s)
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        Self::Predicate(p)
    }
}

impl From<Truth> for Expr {
    fn from(t: Truth) -> Self {
        Self::Constant(t)
    }
}

fn write_combinator(f: &mut fmt::Formatter<'_>, name: &str, children: &[Expr]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(t) => write!(f, "{}", t),
            Self::Predicate(p) => write!(f, "{}", p),
            Self::And(children) => write_combinator(f, "And", children),
            Self::Or(children) => write_combinator(f, "Or", children),
            Self::Not(child) => write!(f, "Not({})", child),
            Self::Identity(child) => write!(f, "Identity({})", child),
        }
    }
}
