//! Three-valued truth with Kleene connectives.
//!
//! - `And`: false dominates (unknown and false = false)
//! - `Or`: true dominates (unknown or true = true)
//! - `Not`: unknown stays unknown

use std::fmt;
use std::ops::Not;

/// Result of evaluating a filter against one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    /// Parse a constant literal (`true`, `false`, `unknown`), any case.
    pub fn parse_literal(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
            Some(Self::True)
        } else if s.eq_ignore_ascii_case("false") {
            Some(Self::False)
        } else if s.eq_ignore_ascii_case("unknown") {
            Some(Self::Unknown)
        } else {
            None
        }
    }

    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
            _ => Self::Unknown,
        }
    }

    /// Conjunction over a lazy sequence; stops pulling at the first `False`.
    pub fn all<I: IntoIterator<Item = Self>>(items: I) -> Self {
        let mut acc = Self::True;
        for t in items {
            if t == Self::False {
                return Self::False;
            }
            acc = acc.and(t);
        }
        acc
    }

    /// Disjunction over a lazy sequence; stops pulling at the first `True`.
    pub fn any<I: IntoIterator<Item = Self>>(items: I) -> Self {
        let mut acc = Self::False;
        for t in items {
            if t == Self::True {
                return Self::True;
            }
            acc = acc.or(t);
        }
        acc
    }

    pub fn is_true(self) -> bool {
        self == Self::True
    }

    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}

impl Not for Truth {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::True => "true",
            Self::False => "false",
            Self::Unknown => "unknown",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Truth::{self, False, True, Unknown};

    const ALL: [Truth; 3] = [True, False, Unknown];

    #[test]
    fn test_and_table() {
        assert_eq!(True.and(True), True);
        assert_eq!(True.and(Unknown), Unknown);
        assert_eq!(Unknown.and(False), False);
        assert_eq!(Unknown.and(Unknown), Unknown);
        for t in ALL {
            assert_eq!(False.and(t), False);
            assert_eq!(t.and(False), False);
        }
    }

    #[test]
    fn test_or_table() {
        assert_eq!(False.or(False), False);
        assert_eq!(False.or(Unknown), Unknown);
        assert_eq!(Unknown.or(True), True);
        for t in ALL {
            assert_eq!(True.or(t), True);
            assert_eq!(t.or(True), True);
        }
    }

    #[test]
    fn test_not_keeps_unknown() {
        assert_eq!(!True, False);
        assert_eq!(!False, True);
        assert_eq!(!Unknown, Unknown);
    }

    #[test]
    fn test_all_short_circuits() {
        let mut pulled = 0;
        let result = Truth::all([True, False, True, Unknown].into_iter().inspect(|_| pulled += 1));
        assert_eq!(result, False);
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_any_short_circuits() {
        let mut pulled = 0;
        let result = Truth::any([Unknown, True, False].into_iter().inspect(|_| pulled += 1));
        assert_eq!(result, True);
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_parse_literal_case_insensitive() {
        assert_eq!(Truth::parse_literal("TRUE"), Some(True));
        assert_eq!(Truth::parse_literal(" False "), Some(False));
        assert_eq!(Truth::parse_literal("Unknown"), Some(Unknown));
        assert_eq!(Truth::parse_literal("yes"), None);
    }
}
