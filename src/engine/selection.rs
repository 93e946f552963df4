//! Version selection and final ordering.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::models::{ModelHeader, ModelVersion};

/// Group accepted headers by identifier and order the result.
///
/// Identifiers ascend; versions within an identifier descend by semantic
/// order. Only the newest version survives unless `list_old_models`.
pub fn select_versions(accepted: &[ModelHeader], list_old_models: bool) -> Vec<(String, String)> {
    let mut groups: BTreeMap<&str, Vec<ModelVersion>> = BTreeMap::new();
    for header in accepted {
        groups
            .entry(header.model_id.as_str())
            .or_default()
            .push(header.parsed_version());
    }

    let mut selected = Vec::new();
    for (model_id, mut versions) in groups {
        versions.sort_by_key(|v| Reverse(v.clone()));
        versions.dedup_by(|a, b| a.as_str() == b.as_str());
        if !list_old_models {
            versions.truncate(1);
        }
        selected.extend(
            versions
                .into_iter()
                .map(|v| (model_id.to_string(), v.as_str().to_string())),
        );
    }
    selected
}

/// Bare identifiers in order, consecutive duplicates removed.
pub fn bare_ids(pairs: Vec<(String, String)>) -> Vec<String> {
    let mut ids: Vec<String> = pairs.into_iter().map(|(id, _)| id).collect();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(entries: &[(&str, &str)]) -> Vec<ModelHeader> {
        entries.iter().map(|(id, v)| ModelHeader::new(*id, *v)).collect()
    }

    #[test]
    fn test_newest_only() {
        let input = headers(&[("A", "1.0.0"), ("A", "2.0.0"), ("B", "1.0.0")]);
        assert_eq!(
            select_versions(&input, false),
            vec![
                ("A".to_string(), "2.0.0".to_string()),
                ("B".to_string(), "1.0.0".to_string())
            ]
        );
    }

    #[test]
    fn test_all_versions_descending() {
        let input = headers(&[("B", "1.0.0"), ("A", "1.2.0"), ("A", "1.10.0"), ("A", "1.9.1")]);
        let out = select_versions(&input, true);
        let versions: Vec<&str> = out.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(versions, vec!["1.10.0", "1.9.1", "1.2.0", "1.0.0"]);
        assert_eq!(out[3].0, "B");
    }

    #[test]
    fn test_numeric_not_lexical_order() {
        let input = headers(&[("A", "9.0.0"), ("A", "10.0.0")]);
        assert_eq!(select_versions(&input, false)[0].1, "10.0.0");
    }

    #[test]
    fn test_bare_ids_dedup() {
        let input = headers(&[("A", "1.0.0"), ("A", "2.0.0"), ("B", "1.0.0")]);
        assert_eq!(bare_ids(select_versions(&input, true)), vec!["A", "B"]);
    }

    #[test]
    fn test_empty() {
        assert!(select_versions(&[], true).is_empty());
    }
}
