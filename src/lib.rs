//! folio-reach: batch reachability over registry entries
//!
//! Runs the `reach-core` constraint-propagation pipeline over a registry of
//! entries and labels every downstream target REACHABLE, CONDITIONAL or
//! UNREACHABLE per entry.
//!
//! This crate adds the batch surface around the pure pipeline:
//! - registry readers (JSON Lines and TSV)
//! - a rayon batch runner that computes each distinct RESTRICTED set once
//! - a JSON Lines report writer with an output fingerprint
//! - batch summaries checked against configured expectations
//! - run manifests for determinism comparison

pub mod batch;
pub mod error;
pub mod fingerprint;
pub mod registry;
pub mod report;
pub mod summary;

pub use batch::{BatchOptions, BatchOutcome, BatchRunner};
pub use error::{OutputError, RegistryError};
pub use fingerprint::{OutputFingerprint, RunManifest, TableFingerprint};
pub use registry::{parse_registry, read_registry, RegistryFormat};
pub use report::ReportWriter;
pub use summary::{
    BatchSummary, ExpectationCheck, LabelCounts, SizeStats, TargetSummary, ZoneSummary,
};

pub use reach_core;
pub use reach_types;
