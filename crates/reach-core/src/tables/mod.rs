//! Frozen reference tables
//!
//! Everything here is built once at startup, validated, and then shared
//! read-only (behind an `Arc`) by every per-entry computation. No stage
//! mutates a table and no entry's state leaks back into one.

pub mod classes;
pub mod folios;
pub mod markers;
pub mod spread;
pub mod zones;

use serde::{Deserialize, Serialize};

pub use classes::{ClassCatalog, ClassKind, InstructionClass, Target, TargetCatalog};
pub use folios::{ContextFolio, FolioCatalog};
pub use markers::MarkerTables;
pub use spread::SpreadTable;
pub use zones::{LegalityViolation, Zone, ZoneLegalityTable, ZoneOrder};

use crate::error::TableError;

/// Largest spread still classified RESTRICTED unless configured otherwise.
///
/// The default keeps the fixed partition: spreads `1..=3` are RESTRICTED
/// and `>= 4` UNIVERSAL. Any other value moves that boundary and is an
/// experimental setting.
pub const DEFAULT_RESTRICTED_MAX_SPREAD: u32 = 3;

/// Inclusive `[low, high]` band an observed batch statistic should fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRange(pub f64, pub f64);

impl ExpectedRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.0 && value <= self.1
    }
}

/// Independent predictions a batch summary is checked against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expectations {
    #[serde(default)]
    pub compatible_folios_mean: Option<ExpectedRange>,
    #[serde(default)]
    pub effective_vocabulary_mean: Option<ExpectedRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSettings {
    restricted_max_spread: u32,
    pub expectations: Expectations,
}

impl PipelineSettings {
    /// `restricted_max_spread` other than [`DEFAULT_RESTRICTED_MAX_SPREAD`]
    /// departs from the fixed RESTRICTED/UNIVERSAL partition.
    pub fn new(
        restricted_max_spread: u32,
        expectations: Expectations,
    ) -> Result<Self, TableError> {
        if restricted_max_spread == 0 {
            return Err(TableError::ZeroRestrictedSpread);
        }
        Ok(Self {
            restricted_max_spread,
            expectations,
        })
    }

    /// Spreads in `1..=restricted_max_spread` are RESTRICTED.
    pub fn restricted_max_spread(&self) -> u32 {
        self.restricted_max_spread
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            restricted_max_spread: DEFAULT_RESTRICTED_MAX_SPREAD,
            expectations: Expectations::default(),
        }
    }
}

/// The complete, validated table set for one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceTables {
    pub markers: MarkerTables,
    pub folios: FolioCatalog,
    pub spreads: SpreadTable,
    pub zones: ZoneOrder,
    pub legality: ZoneLegalityTable,
    pub classes: ClassCatalog,
    pub targets: TargetCatalog,
    pub settings: PipelineSettings,
}

impl ReferenceTables {
    /// Short description used in load logs and the CLI.
    pub fn describe(&self) -> String {
        let counts = [
            (self.markers.families().len(), "prefix families"),
            (self.markers.suffixes().len(), "suffixes"),
            (self.folios.len(), "folios"),
            (self.spreads.len(), "indexed middles"),
            (self.zones.len(), "zones"),
            (self.legality.len(), "legality entries"),
            (self.classes.len(), "classes"),
            (self.targets.len(), "targets"),
        ];
        counts
            .iter()
            .map(|(count, what)| format!("{count} {what}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
