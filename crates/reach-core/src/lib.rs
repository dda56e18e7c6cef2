//! reach-core: reference tables and constraint-propagation stages
//!
//! This crate contains the pure pipeline logic with no output I/O:
//! - Frozen reference tables (markers, folios, spreads, zones, classes, targets)
//! - YAML table loader with fatal validation
//! - One pure function per stage (decompose, bundle, classify, compat,
//!   vocabulary, zone, reach)
//! - `ConstraintPipeline`, the ordered composition of those stages
//!
//! Batch scheduling, registry file formats and report writing live in the
//! `folio-reach` crate.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod stages;
pub mod tables;

pub use config::{TableDocuments, TableLoader, TABLES_DIR_ENV};
pub use error::TableError;
pub use pipeline::{BundleStage, ConstraintPipeline, EntryOutcome, Propagation};
pub use stages::{MonotonicityViolation, Reachability, ZoneReach};
pub use tables::{
    ClassCatalog, ClassKind, ContextFolio, Expectations, ExpectedRange, FolioCatalog,
    InstructionClass, LegalityViolation, MarkerTables, PipelineSettings, ReferenceTables,
    SpreadTable, Target, TargetCatalog, Zone, ZoneLegalityTable, ZoneOrder,
};
