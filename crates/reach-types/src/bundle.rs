//! Constraint bundles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The pair of sets aggregated from one registry entry.
///
/// Equality is plain set equality: token order and duplicate count never
/// affect a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintBundle {
    pub middles: BTreeSet<String>,
    pub prefix_families: BTreeSet<String>,
}

impl ConstraintBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.middles.is_empty() && self.prefix_families.is_empty()
    }
}
