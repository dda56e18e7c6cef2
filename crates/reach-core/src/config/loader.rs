//! Table loader
//!
//! Loads and validates the YAML table files from a tables directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::types::{
    ClassConfig, FolioConfig, MarkersConfig, SettingsConfig, TableDocuments, TargetConfig,
    ZonesConfig,
};
use crate::tables::ReferenceTables;

/// Environment variable naming the tables directory.
pub const TABLES_DIR_ENV: &str = "FOLIO_REACH_TABLES";

pub struct TableLoader {
    tables_dir: PathBuf,
}

impl TableLoader {
    pub fn new(tables_dir: impl Into<PathBuf>) -> Self {
        Self {
            tables_dir: tables_dir.into(),
        }
    }

    /// Create loader from FOLIO_REACH_TABLES or default to "tables"
    ///
    /// Path resolution order:
    /// 1. FOLIO_REACH_TABLES environment variable (explicit override)
    /// 2. Relative "tables" path (works when running from workspace root)
    /// 3. CARGO_MANIFEST_DIR/tables, then its ancestors
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var(TABLES_DIR_ENV) {
            return Self::new(dir);
        }

        if Path::new("tables").join("markers.yaml").exists() {
            return Self::new("tables");
        }

        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            if let Some(dir) = Self::find_tables_dir(Path::new(&manifest_dir)) {
                return Self::new(dir);
            }
        }

        // Last resort - return "tables" and let it fail with clear error
        Self::new("tables")
    }

    /// Traverse up to 3 levels looking for tables/markers.yaml
    fn find_tables_dir(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir;
        for _ in 0..3 {
            let candidate = current.join("tables");
            if candidate.join("markers.yaml").exists() {
                return Some(candidate);
            }
            current = current.parent()?;
        }
        None
    }

    pub fn tables_dir(&self) -> &Path {
        &self.tables_dir
    }

    /// Read every table file without validating cross-table consistency.
    pub fn load_documents(&self) -> Result<TableDocuments> {
        info!(
            "Loading reference tables from {}",
            self.tables_dir.display()
        );

        let markers: MarkersConfig = self.read_required("markers.yaml")?;
        let folios: Vec<FolioConfig> = self.read_required("folios.yaml")?;
        let spreads: Option<BTreeMap<String, u32>> = self.read_optional("spreads.yaml")?;
        let zones: ZonesConfig = self.read_required("zones.yaml")?;
        let classes: Vec<ClassConfig> = self.read_required("classes.yaml")?;
        let targets: Vec<TargetConfig> = self.read_required("targets.yaml")?;
        let settings: SettingsConfig = self.read_optional("settings.yaml")?.unwrap_or_default();

        if spreads.is_none() {
            debug!("spreads.yaml absent; spreads will be derived from folio vocabularies");
        }
        if folios.is_empty() {
            warn!("folios.yaml defines no context-folios; every entry will be unreachable");
        }

        Ok(TableDocuments {
            markers,
            folios,
            spreads,
            zones,
            classes,
            targets,
            settings,
        })
    }

    /// Load, validate and freeze the full table set.
    pub fn load(&self) -> Result<ReferenceTables> {
        let tables = self
            .load_documents()?
            .build()
            .with_context(|| format!("Invalid tables in {}", self.tables_dir.display()))?;

        info!("Loaded {}", tables.describe());

        let violations = tables.legality.monotonicity_violations(&tables.zones);
        if !violations.is_empty() {
            warn!(
                "zone-legality table widens legality for {} middle/zone pairs",
                violations.len()
            );
        }

        Ok(tables)
    }

    fn read_required<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.tables_dir.join(file);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn read_optional<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let path = self.tables_dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        self.read_required(file).map(Some)
    }
}
