//! Textual filter parsing.
//!
//! Grammar: `ATTR OP VALUE` with `OP` one of `==`, `!=`, `is`, `is not`,
//! `equals`, `in`, `not in` (keywords case-insensitive). `VALUE` is a bare
//! token, a quoted string, or a bracketed list for `in` / `not in`. A filter
//! that is exactly `true`, `false` or `unknown` is a constant.

use std::sync::OnceLock;

use regex::Regex;

use super::error::FilterError;
use super::expr::{check_attribute, Expr, Operand, Operator, Predicate};
use super::truth::Truth;

const PREDICATE_PATTERN: &str = r"^\s*(?P<attr>[^\s=!]+)\s*(?P<op>==|!=|(?i:\s+is\s+not\s+|\s+not\s+in\s+|\s+is\s+|\s+in\s+|\s+equals\s+))\s*(?P<value>.*?)\s*$";

static PREDICATE_REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn predicate_regex() -> Result<&'static Regex, FilterError> {
    PREDICATE_REGEX
        .get_or_init(|| Regex::new(PREDICATE_PATTERN))
        .as_ref()
        .map_err(|e| FilterError::Parse(format!("predicate grammar failed to compile: {}", e)))
}

/// Parse a textual filter into a constant or a single predicate.
pub fn parse_filter(text: &str) -> Result<Expr, FilterError> {
    if let Some(truth) = Truth::parse_literal(text) {
        return Ok(Expr::Constant(truth));
    }
    parse_predicate(text).map(Expr::Predicate)
}

/// Parse `ATTR OP VALUE`.
pub fn parse_predicate(text: &str) -> Result<Predicate, FilterError> {
    let caps = predicate_regex()?
        .captures(text)
        .ok_or_else(|| FilterError::Parse(format!("expected 'ATTR OP VALUE', got '{}'", text.trim())))?;

    let attribute = &caps["attr"];
    check_attribute(attribute)?;

    let operator = parse_operator(&caps["op"])?;
    let operands = parse_operands(operator, &caps["value"])?;
    Predicate::new(attribute, operator, operands)
}

fn parse_operator(raw: &str) -> Result<Operator, FilterError> {
    let words: Vec<String> = raw.split_whitespace().map(str::to_ascii_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["=="] | ["is"] | ["equals"] => Ok(Operator::Equals),
        ["!="] | ["is", "not"] => Ok(Operator::NotEquals),
        ["in"] => Ok(Operator::In),
        ["not", "in"] => Ok(Operator::NotIn),
        _ => Err(FilterError::Parse(format!("unknown operator '{}'", raw.trim()))),
    }
}

fn parse_operands(operator: Operator, raw: &str) -> Result<Vec<Operand>, FilterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FilterError::Parse(format!("missing value after '{}'", operator)));
    }
    if operator.takes_list() {
        let inner = raw
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .ok_or_else(|| {
                FilterError::Parse(format!("'{}' expects a bracketed list, got '{}'", operator, raw))
            })?;
        split_list(inner)?.into_iter().map(parse_scalar).collect()
    } else {
        if raw.starts_with('[') {
            return Err(FilterError::Parse(format!(
                "list value '{}' requires 'in' or 'not in'",
                raw
            )));
        }
        Ok(vec![parse_scalar(raw)?])
    }
}

fn parse_scalar(token: &str) -> Result<Operand, FilterError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(FilterError::Parse("empty value".into()));
    }
    if let Some(text) = unquote(token)? {
        return Ok(Operand::Value(text.to_string()));
    }
    if token.eq_ignore_ascii_case("unknown") {
        return Ok(Operand::Unknown);
    }
    Ok(Operand::Value(token.to_string()))
}

/// Strip matching quotes; `Ok(None)` for unquoted tokens.
fn unquote(token: &str) -> Result<Option<&str>, FilterError> {
    let Some(quote) = token.chars().next().filter(|c| *c == '\'' || *c == '"') else {
        return Ok(None);
    };
    if token.len() < 2 || !token.ends_with(quote) {
        return Err(FilterError::Parse(format!("unterminated quote in '{}'", token)));
    }
    Ok(Some(&token[1..token.len() - 1]))
}

/// Split list contents on commas outside quotes.
fn split_list(inner: &str) -> Result<Vec<&str>, FilterError> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ',') => {
                items.push(inner[start..i].trim());
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    if quote.is_some() {
        return Err(FilterError::Parse(format!("unterminated quote in list '[{}]'", inner)));
    }
    let last = inner[start..].trim();
    // trailing comma
    if !last.is_empty() || items.is_empty() {
        items.push(last);
    }
    if items.iter().any(|item| item.is_empty()) {
        return Err(FilterError::Parse(format!("empty list element in '[{}]'", inner)));
    }
    Ok(items)
}
