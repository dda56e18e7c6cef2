//! Shared Types for the Reachability Pipeline
//!
//! This crate is the single source of truth for every type that crosses a
//! stage boundary or is persisted to disk.
//!
//! ## Flow
//!
//! ```text
//! RegistryEntry ──► Decomposition* ──► ConstraintBundle ──► MiddlePartition
//!                                                               │
//!                       EntryReport ◄── ReachStatus ◄── ClassSet (per zone)
//! ```
//!
//! ## Rules
//!
//! 1. Sets are `BTreeSet` so that serialized output is deterministic
//! 2. Enums serialize in `SCREAMING_SNAKE_CASE` to match downstream readers
//! 3. No logic beyond constructors and set queries lives here

pub mod bundle;
pub mod class_set;
pub mod entry;
pub mod middle;
pub mod morphology;
pub mod report;

pub use bundle::ConstraintBundle;
pub use class_set::{ClassId, ClassSet, InvalidClassId, CLASS_COUNT};
pub use entry::RegistryEntry;
pub use middle::{MiddleClass, MiddlePartition};
pub use morphology::{Decomposition, Morphology};
pub use report::{EntryDiagnostics, EntryReport, ReachStatus, TargetVerdict, ZoneDiagnostics};
