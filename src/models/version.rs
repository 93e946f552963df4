//! Semantic versions for catalog entries.
//!
//! Ordering and equality look at the numeric `major.minor.patch` triple only.
//! Pre-release and build metadata survive in the raw string for display.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version '{0}': {1}")]
    Invalid(String, String),
}

/// A catalog version string with its parsed numeric triple.
///
/// Strings that do not parse as a version keep `triple == None` and sort
/// below every parseable version.
#[derive(Debug, Clone)]
pub struct ModelVersion {
    raw: String,
    triple: Option<(u64, u64, u64)>,
}

impl ModelVersion {
    /// Parse strictly, failing on anything that is not a version.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let triple = parse_triple(raw)?;
        Ok(Self {
            raw: raw.trim().to_string(),
            triple: Some(triple),
        })
    }

    /// Parse without failing; invalid strings become unordered versions.
    pub fn lenient(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            triple: parse_triple(raw).ok(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn triple(&self) -> Option<(u64, u64, u64)> {
        self.triple
    }

    pub fn is_valid(&self) -> bool {
        self.triple.is_some()
    }
}

/// Parse `raw` into a numeric triple.
///
/// `semver` handles the full grammar; short forms like `2` or `1.4` are
/// padded with zero components before a second attempt.
fn parse_triple(raw: &str) -> Result<(u64, u64, u64), VersionError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| VersionError::Invalid(raw.to_string(), reason);

    match semver::Version::parse(trimmed) {
        Ok(v) => Ok((v.major, v.minor, v.patch)),
        Err(first) => {
            let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
            let (core, suffix) = trimmed.split_at(split_at);
            let components = core.split('.').count();
            if core.is_empty() || components >= 3 {
                return Err(invalid(first.to_string()));
            }
            let padded = format!("{}{}{}", core, ".0".repeat(3 - components), suffix);
            semver::Version::parse(&padded)
                .map(|v| (v.major, v.minor, v.patch))
                .map_err(|e| invalid(e.to_string()))
        }
    }
}

impl PartialEq for ModelVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModelVersion {}

impl PartialOrd for ModelVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModelVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.triple, other.triple) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, None) => self.raw.cmp(&other.raw),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
