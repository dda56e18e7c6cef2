//! YAML document shapes for the table files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use reach_types::{ClassId, ClassSet};

use crate::error::TableError;
use crate::tables::{
    ClassCatalog, ClassKind, ContextFolio, Expectations, FolioCatalog, InstructionClass,
    MarkerTables, PipelineSettings, ReferenceTables, SpreadTable, Target, TargetCatalog, Zone,
    ZoneLegalityTable, ZoneOrder, DEFAULT_RESTRICTED_MAX_SPREAD,
};

/// `markers.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkersConfig {
    pub prefixes: Vec<String>,
    /// Extended variant → base family
    #[serde(default)]
    pub extended_prefixes: BTreeMap<String, String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub infrastructure: Vec<String>,
}

/// One entry of `folios.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    pub id: String,
    pub vocabulary: Vec<String>,
}

/// One zone of `zones.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub label: String,
    /// Legality column this zone reads; defaults to its own label
    #[serde(default)]
    pub canonical: Option<String>,
}

/// `zones.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonesConfig {
    pub zones: Vec<ZoneConfig>,
    /// MIDDLE → canonical zones in which it is legal
    #[serde(default)]
    pub legality: BTreeMap<String, BTreeSet<String>>,
}

/// One entry of `classes.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassConfig {
    pub id: u32,
    pub kind: ClassKind,
    #[serde(default)]
    pub middles: Vec<String>,
}

/// One entry of `targets.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub id: String,
    pub footprint: Vec<u32>,
}

/// `settings.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_restricted_max_spread")]
    pub restricted_max_spread: u32,
    #[serde(default)]
    pub expectations: Expectations,
}

fn default_restricted_max_spread() -> u32 {
    DEFAULT_RESTRICTED_MAX_SPREAD
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            restricted_max_spread: DEFAULT_RESTRICTED_MAX_SPREAD,
            expectations: Expectations::default(),
        }
    }
}

/// Every table document, parsed but not yet validated.
#[derive(Debug, Clone, Default)]
pub struct TableDocuments {
    pub markers: MarkersConfig,
    pub folios: Vec<FolioConfig>,
    /// Explicit spreads; derived from folio vocabularies when absent
    pub spreads: Option<BTreeMap<String, u32>>,
    pub zones: ZonesConfig,
    pub classes: Vec<ClassConfig>,
    pub targets: Vec<TargetConfig>,
    pub settings: SettingsConfig,
}

impl TableDocuments {
    /// Validate and freeze into a [`ReferenceTables`].
    pub fn build(self) -> Result<ReferenceTables, TableError> {
        let markers = MarkerTables::new(
            self.markers.prefixes,
            self.markers.extended_prefixes,
            self.markers.suffixes,
            self.markers.infrastructure,
        )?;

        let folios = FolioCatalog::new(
            self.folios
                .into_iter()
                .map(|f| ContextFolio::new(f.id, f.vocabulary))
                .collect(),
        )?;

        let spreads = match self.spreads {
            Some(counts) => SpreadTable::from_counts(counts),
            None => SpreadTable::derive(&folios),
        };

        let zones = ZoneOrder::new(
            self.zones
                .zones
                .into_iter()
                .map(|z| match z.canonical {
                    Some(canonical) => Zone::consolidated(z.label, canonical),
                    None => Zone::new(z.label),
                })
                .collect(),
        )?;
        let legality = ZoneLegalityTable::new(self.zones.legality, &zones)?;

        let classes = self
            .classes
            .into_iter()
            .map(|c| {
                let id = ClassId::new(c.id)?;
                Ok(InstructionClass::with_kind(id, c.kind, c.middles))
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        let classes = ClassCatalog::new(classes)?;

        let targets = self
            .targets
            .into_iter()
            .map(|t| {
                let footprint = t
                    .footprint
                    .into_iter()
                    .map(ClassId::new)
                    .collect::<Result<ClassSet, _>>()?;
                Ok(Target::new(t.id, footprint))
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        let targets = TargetCatalog::new(targets)?;

        let settings = PipelineSettings::new(
            self.settings.restricted_max_spread,
            self.settings.expectations,
        )?;

        Ok(ReferenceTables {
            markers,
            folios,
            spreads,
            zones,
            legality,
            classes,
            targets,
            settings,
        })
    }
}
