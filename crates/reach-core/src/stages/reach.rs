//! Class reachability and target classification.

use std::collections::BTreeSet;

use reach_types::{ClassSet, ReachStatus};

use crate::tables::ClassCatalog;

/// Classes usable given one zone's legal vocabulary.
///
/// Kernel and atomic classes always survive. A decomposable class survives
/// when any one of its required middles is legal; it is pruned only when
/// the whole requirement is disjoint from `legal`.
pub fn reachable_classes(legal: &BTreeSet<String>, catalog: &ClassCatalog) -> ClassSet {
    let mut reachable = ClassSet::full();
    for class in catalog.decomposable() {
        if class.middles().is_disjoint(legal) {
            reachable.remove(class.id());
        }
    }
    reachable
}

/// Reachable classes for one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReach {
    pub zone: String,
    pub legal_vocabulary: BTreeSet<String>,
    pub reachable: ClassSet,
}

/// Per-entry reachability across all zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    /// No compatible folio: nothing is reachable in any zone.
    Closed,
    /// One record per zone, in zone order.
    Open(Vec<ZoneReach>),
}

impl Reachability {
    pub fn zones(&self) -> &[ZoneReach] {
        match self {
            Reachability::Closed => &[],
            Reachability::Open(zones) => zones,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Reachability::Closed)
    }
}

/// REACHABLE if `footprint` fits in every zone, UNREACHABLE if in none,
/// CONDITIONAL otherwise. A closed entry is UNREACHABLE for every target.
pub fn classify_target(footprint: ClassSet, reachability: &Reachability) -> ReachStatus {
    let zones = reachability.zones();
    let fits = zones
        .iter()
        .filter(|z| footprint.is_subset(&z.reachable))
        .count();

    if fits == 0 {
        ReachStatus::Unreachable
    } else if fits == zones.len() {
        ReachStatus::Reachable
    } else {
        ReachStatus::Conditional
    }
}
