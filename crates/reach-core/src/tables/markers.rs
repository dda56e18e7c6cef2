//! Marker families, universal suffixes and infrastructure tokens.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::TableError;

/// Static morphology tables used by the token decomposer.
///
/// Candidate lists are precomputed longest-first so that matching is a
/// single ordered scan.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerTables {
    families: BTreeSet<String>,
    /// Extended variant → base family
    extended: BTreeMap<String, String>,
    suffixes: BTreeSet<String>,
    infrastructure: BTreeSet<String>,
    #[serde(skip)]
    prefix_candidates: Vec<(String, String)>,
    #[serde(skip)]
    suffix_candidates: Vec<String>,
}

impl MarkerTables {
    pub fn new<F, S, I>(
        families: F,
        extended: BTreeMap<String, String>,
        suffixes: S,
        infrastructure: I,
    ) -> Result<Self, TableError>
    where
        F: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
        I: IntoIterator<Item = String>,
    {
        let families: BTreeSet<String> = families.into_iter().collect();
        if families.is_empty() {
            return Err(TableError::NoPrefixFamilies);
        }
        for marker in families.iter().chain(extended.keys()) {
            let length = marker.chars().count();
            if !(2..=3).contains(&length) {
                return Err(TableError::MarkerLength {
                    marker: marker.clone(),
                    length,
                });
            }
        }
        for (variant, family) in &extended {
            if families.contains(variant) {
                return Err(TableError::ExtendedShadowsFamily(variant.clone()));
            }
            if !families.contains(family) {
                return Err(TableError::UnknownBaseFamily {
                    variant: variant.clone(),
                    family: family.clone(),
                });
            }
        }

        let suffixes: BTreeSet<String> = suffixes.into_iter().collect();
        if suffixes.contains("") {
            return Err(TableError::EmptyEntry { table: "suffix" });
        }
        let infrastructure: BTreeSet<String> = infrastructure.into_iter().collect();
        if infrastructure.contains("") {
            return Err(TableError::EmptyEntry {
                table: "infrastructure",
            });
        }

        let mut prefix_candidates: Vec<(String, String)> = families
            .iter()
            .map(|f| (f.clone(), f.clone()))
            .chain(extended.iter().map(|(v, f)| (v.clone(), f.clone())))
            .collect();
        prefix_candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut suffix_candidates: Vec<String> = suffixes.iter().cloned().collect();
        suffix_candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Ok(Self {
            families,
            extended,
            suffixes,
            infrastructure,
            prefix_candidates,
            suffix_candidates,
        })
    }

    /// Longest marker at the start of `token`, as `(marker, family)`.
    pub fn match_prefix(&self, token: &str) -> Option<(&str, &str)> {
        self.prefix_candidates
            .iter()
            .find(|(marker, _)| token.starts_with(marker.as_str()))
            .map(|(marker, family)| (marker.as_str(), family.as_str()))
    }

    /// Longest universal suffix at the end of `rest`.
    pub fn match_suffix(&self, rest: &str) -> Option<&str> {
        self.suffix_candidates
            .iter()
            .find(|suffix| rest.ends_with(suffix.as_str()))
            .map(String::as_str)
    }

    pub fn is_infrastructure(&self, token: &str) -> bool {
        self.infrastructure.contains(token)
    }

    pub fn families(&self) -> &BTreeSet<String> {
        &self.families
    }

    pub fn extended(&self) -> &BTreeMap<String, String> {
        &self.extended
    }

    pub fn suffixes(&self) -> &BTreeSet<String> {
        &self.suffixes
    }

    pub fn infrastructure(&self) -> &BTreeSet<String> {
        &self.infrastructure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn tables() -> MarkerTables {
        let extended = BTreeMap::from([("lch".to_string(), "ch".to_string())]);
        MarkerTables::new(
            strings(&["ch", "sh", "qo", "cth"]),
            extended,
            strings(&["y", "dy", "edy", "aiin"]),
            strings(&["s", "y"]),
        )
        .unwrap()
    }

    #[test]
    fn longest_prefix_wins() {
        let t = tables();
        assert_eq!(t.match_prefix("cthey"), Some(("cth", "cth")));
        assert_eq!(t.match_prefix("chey"), Some(("ch", "ch")));
        assert_eq!(t.match_prefix("lchey"), Some(("lch", "ch")));
        assert_eq!(t.match_prefix("daiin"), None);
    }

    #[test]
    fn longest_suffix_wins() {
        let t = tables();
        assert_eq!(t.match_suffix("oedy"), Some("edy"));
        assert_eq!(t.match_suffix("ody"), Some("dy"));
        assert_eq!(t.match_suffix("ok"), None);
    }

    #[test]
    fn rejects_empty_family_set() {
        let err = MarkerTables::new(Vec::new(), BTreeMap::new(), Vec::new(), Vec::new());
        assert_eq!(err.unwrap_err(), TableError::NoPrefixFamilies);
    }

    #[test]
    fn rejects_bad_marker_length() {
        let err = MarkerTables::new(
            strings(&["c"]),
            BTreeMap::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::MarkerLength { length: 1, .. }));
    }

    #[test]
    fn rejects_extended_marker_with_unknown_family() {
        let extended = BTreeMap::from([("lsh".to_string(), "sh".to_string())]);
        let err =
            MarkerTables::new(strings(&["ch"]), extended, Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, TableError::UnknownBaseFamily { .. }));
    }

    #[test]
    fn rejects_empty_suffix() {
        let err = MarkerTables::new(strings(&["ch"]), BTreeMap::new(), strings(&[""]), Vec::new())
            .unwrap_err();
        assert_eq!(err, TableError::EmptyEntry { table: "suffix" });
    }
}
