//! Table configuration: YAML document types and the directory loader.

pub mod loader;
pub mod types;

pub use loader::{TableLoader, TABLES_DIR_ENV};
pub use types::{
    ClassConfig, FolioConfig, MarkersConfig, SettingsConfig, TableDocuments, TargetConfig,
    ZoneConfig, ZonesConfig,
};
