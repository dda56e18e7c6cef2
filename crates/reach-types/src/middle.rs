//! MIDDLE classification by folio spread.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Spread-based label for a single MIDDLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MiddleClass {
    /// Appears in a small number of context-folios; constrains compatibility.
    Restricted,
    /// Appears widely; never constrains compatibility.
    Universal,
    /// Absent from the context index. Not evidence of incompatibility.
    Unknown,
}

impl fmt::Display for MiddleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MiddleClass::Restricted => "RESTRICTED",
            MiddleClass::Universal => "UNIVERSAL",
            MiddleClass::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Three disjoint subsets whose union is a bundle's middle set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlePartition {
    pub restricted: BTreeSet<String>,
    pub universal: BTreeSet<String>,
    pub unknown: BTreeSet<String>,
}

impl MiddlePartition {
    pub fn insert(&mut self, middle: String, class: MiddleClass) {
        match class {
            MiddleClass::Restricted => self.restricted.insert(middle),
            MiddleClass::Universal => self.universal.insert(middle),
            MiddleClass::Unknown => self.unknown.insert(middle),
        };
    }

    pub fn class_of(&self, middle: &str) -> Option<MiddleClass> {
        if self.restricted.contains(middle) {
            Some(MiddleClass::Restricted)
        } else if self.universal.contains(middle) {
            Some(MiddleClass::Universal)
        } else if self.unknown.contains(middle) {
            Some(MiddleClass::Unknown)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.restricted.len() + self.universal.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Union of all three subsets.
    pub fn all(&self) -> BTreeSet<String> {
        self.restricted
            .iter()
            .chain(&self.universal)
            .chain(&self.unknown)
            .cloned()
            .collect()
    }

    /// True when no middle appears in more than one subset.
    pub fn is_disjoint(&self) -> bool {
        self.restricted.is_disjoint(&self.universal)
            && self.restricted.is_disjoint(&self.unknown)
            && self.universal.is_disjoint(&self.unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_of_reports_subset() {
        let mut p = MiddlePartition::default();
        p.insert("sho".into(), MiddleClass::Restricted);
        p.insert("e".into(), MiddleClass::Universal);
        p.insert("qqq".into(), MiddleClass::Unknown);

        assert_eq!(p.class_of("sho"), Some(MiddleClass::Restricted));
        assert_eq!(p.class_of("e"), Some(MiddleClass::Universal));
        assert_eq!(p.class_of("qqq"), Some(MiddleClass::Unknown));
        assert_eq!(p.class_of("od"), None);
        assert_eq!(p.len(), 3);
        assert!(p.is_disjoint());
    }

    #[test]
    fn middle_class_display() {
        assert_eq!(MiddleClass::Restricted.to_string(), "RESTRICTED");
    }
}
