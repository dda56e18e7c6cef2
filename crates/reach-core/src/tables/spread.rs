//! MIDDLE spread table: how many context-folios contain each MIDDLE.

use serde::Serialize;
use std::collections::BTreeMap;

use super::folios::FolioCatalog;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpreadTable {
    counts: BTreeMap<String, u32>,
}

impl SpreadTable {
    /// Use externally computed spreads as-is.
    pub fn from_counts(counts: BTreeMap<String, u32>) -> Self {
        Self { counts }
    }

    /// Count, for every MIDDLE in any vocabulary, the folios that contain it.
    pub fn derive(folios: &FolioCatalog) -> Self {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for folio in folios {
            for middle in folio.vocabulary() {
                *counts.entry(middle.clone()).or_default() += 1;
            }
        }
        Self { counts }
    }

    /// Spread of `middle`; zero when the middle is not indexed.
    pub fn spread(&self, middle: &str) -> u32 {
        self.counts.get(middle).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
