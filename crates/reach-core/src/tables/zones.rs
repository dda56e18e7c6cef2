//! Processing zones and the per-MIDDLE zone-legality table.
//!
//! Zones are ordered. Each zone carries a canonical label used for legality
//! lookups, which lets several numbered sub-zones (e.g. `R1`, `R2`, `R3`)
//! share one legality column (`R`). The consolidation is configuration
//! data, never code.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::TableError;

/// One processing zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    label: String,
    canonical: String,
}

impl Zone {
    /// Zone whose canonical label is its own label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            canonical: label.clone(),
            label,
        }
    }

    /// Zone consolidated into `canonical` for legality lookup.
    pub fn consolidated(label: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            canonical: canonical.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// Fixed, non-empty ordering of zones.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ZoneOrder {
    zones: Vec<Zone>,
}

impl ZoneOrder {
    pub fn new(zones: Vec<Zone>) -> Result<Self, TableError> {
        if zones.is_empty() {
            return Err(TableError::NoZones);
        }
        let mut seen = HashSet::new();
        for zone in &zones {
            if !seen.insert(zone.label.as_str()) {
                return Err(TableError::DuplicateZone(zone.label.clone()));
            }
        }
        Ok(Self { zones })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(Zone::label)
    }

    pub fn canonical_labels(&self) -> BTreeSet<&str> {
        self.zones.iter().map(Zone::canonical).collect()
    }
}

/// A MIDDLE legal in a later zone but not in an earlier adjacent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalityViolation {
    pub middle: String,
    pub earlier: String,
    pub later: String,
}

/// MIDDLE → set of canonical zones in which it is legal.
///
/// MIDDLEs without an entry are legal everywhere.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ZoneLegalityTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ZoneLegalityTable {
    /// Build the table, checking every named zone against `order`.
    pub fn new(
        entries: BTreeMap<String, BTreeSet<String>>,
        order: &ZoneOrder,
    ) -> Result<Self, TableError> {
        let known = order.canonical_labels();
        for (middle, zones) in &entries {
            if let Some(zone) = zones.iter().find(|z| !known.contains(z.as_str())) {
                return Err(TableError::UnknownLegalityZone {
                    middle: middle.clone(),
                    zone: zone.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn is_legal(&self, middle: &str, zone: &Zone) -> bool {
        self.entries
            .get(middle)
            .map_or(true, |zones| zones.contains(zone.canonical()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every place where the table widens legality along `order`.
    ///
    /// Adjacent pairs are sufficient: any widening between two distant zones
    /// implies one between some adjacent pair in between.
    pub fn monotonicity_violations(&self, order: &ZoneOrder) -> Vec<LegalityViolation> {
        let mut violations = Vec::new();
        for middle in self.entries.keys() {
            for pair in order.zones.windows(2) {
                let (earlier, later) = (&pair[0], &pair[1]);
                if !self.is_legal(middle, earlier) && self.is_legal(middle, later) {
                    violations.push(LegalityViolation {
                        middle: middle.clone(),
                        earlier: earlier.label.clone(),
                        later: later.label.clone(),
                    });
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> ZoneOrder {
        ZoneOrder::new(vec![
            Zone::new("C"),
            Zone::new("P"),
            Zone::consolidated("R1", "R"),
            Zone::consolidated("R2", "R"),
            Zone::consolidated("R3", "R"),
            Zone::new("S"),
        ])
        .unwrap()
    }

    fn zones(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn consolidated_zones_share_legality() {
        let order = order();
        let table =
            ZoneLegalityTable::new(BTreeMap::from([("sho".into(), zones(&["C", "R"]))]), &order)
                .unwrap();
        let legal: Vec<&str> = order
            .iter()
            .filter(|z| table.is_legal("sho", z))
            .map(Zone::label)
            .collect();
        assert_eq!(legal, vec!["C", "R1", "R2", "R3"]);
    }

    #[test]
    fn absent_middle_is_legal_everywhere() {
        let order = order();
        let table = ZoneLegalityTable::default();
        assert!(order.iter().all(|z| table.is_legal("e", z)));
    }

    #[test]
    fn unknown_zone_rejected() {
        let err = ZoneLegalityTable::new(BTreeMap::from([("e".into(), zones(&["R2"]))]), &order())
            .unwrap_err();
        assert!(matches!(err, TableError::UnknownLegalityZone { .. }));
    }

    #[test]
    fn duplicate_zone_rejected() {
        let err = ZoneOrder::new(vec![Zone::new("C"), Zone::new("C")]).unwrap_err();
        assert_eq!(err, TableError::DuplicateZone("C".into()));
        assert_eq!(ZoneOrder::new(Vec::new()).unwrap_err(), TableError::NoZones);
    }

    #[test]
    fn monotonicity_violations_reported_per_adjacent_pair() {
        let order = order();
        let table = ZoneLegalityTable::new(
            BTreeMap::from([
                ("ok".into(), zones(&["C", "P", "R"])),
                ("bad".into(), zones(&["C", "S"])),
            ]),
            &order,
        )
        .unwrap();
        let violations = table.monotonicity_violations(&order);
        assert_eq!(
            violations,
            vec![LegalityViolation {
                middle: "bad".into(),
                earlier: "R3".into(),
                later: "S".into(),
            }]
        );
    }
}
