//! MIDDLE classification by spread.

use std::collections::BTreeSet;

use reach_types::{MiddleClass, MiddlePartition};

use crate::tables::SpreadTable;

/// Label for a single spread count.
///
/// Zero is UNKNOWN, never RESTRICTED: the middle is missing from the
/// context index, which says nothing about compatibility.
pub fn middle_class(spread: u32, restricted_max_spread: u32) -> MiddleClass {
    match spread {
        0 => MiddleClass::Unknown,
        s if s <= restricted_max_spread => MiddleClass::Restricted,
        _ => MiddleClass::Universal,
    }
}

/// Partition `middles` into RESTRICTED / UNIVERSAL / UNKNOWN.
pub fn classify_middles(
    middles: &BTreeSet<String>,
    spreads: &SpreadTable,
    restricted_max_spread: u32,
) -> MiddlePartition {
    let mut partition = MiddlePartition::default();
    for middle in middles {
        let class = middle_class(spreads.spread(middle), restricted_max_spread);
        partition.insert(middle.clone(), class);
    }
    partition
}
