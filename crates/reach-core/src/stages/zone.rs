//! Zone legality filter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::tables::{Zone, ZoneLegalityTable, ZoneOrder};

/// Legal vocabulary for one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneVocabulary {
    pub zone: String,
    pub legal: BTreeSet<String>,
}

/// Adjacent zone pair where the later zone admits a middle the earlier one
/// does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonotonicityViolation {
    pub earlier: String,
    pub later: String,
    /// Middles legal in `later` but not in `earlier`
    pub widened: BTreeSet<String>,
}

/// `{ m in effective : zone in legality(m) }`
pub fn zone_legal_vocabulary(
    effective: &BTreeSet<String>,
    zone: &Zone,
    legality: &ZoneLegalityTable,
) -> BTreeSet<String> {
    effective
        .iter()
        .filter(|m| legality.is_legal(m, zone))
        .cloned()
        .collect()
}

/// Legal vocabulary for every zone, in zone order.
pub fn legal_vocabularies(
    effective: &BTreeSet<String>,
    order: &ZoneOrder,
    legality: &ZoneLegalityTable,
) -> Vec<ZoneVocabulary> {
    order
        .iter()
        .map(|zone| ZoneVocabulary {
            zone: zone.label().to_string(),
            legal: zone_legal_vocabulary(effective, zone, legality),
        })
        .collect()
}

/// Check that legal vocabularies never widen along the zone ordering.
///
/// Narrowing is expected but not guaranteed by construction; this reports
/// where it fails instead of assuming it.
pub fn monotonicity_violations(zones: &[ZoneVocabulary]) -> Vec<MonotonicityViolation> {
    zones
        .windows(2)
        .filter_map(|pair| {
            let widened: BTreeSet<String> =
                pair[1].legal.difference(&pair[0].legal).cloned().collect();
            (!widened.is_empty()).then(|| MonotonicityViolation {
                earlier: pair[0].zone.clone(),
                later: pair[1].zone.clone(),
                widened,
            })
        })
        .collect()
}
