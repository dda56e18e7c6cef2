//! Table construction errors
//!
//! Every variant is a configuration defect. They surface while tables are
//! being built, before any registry entry is processed, and are fatal.

use reach_types::InvalidClassId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("marker table defines no prefix families")]
    NoPrefixFamilies,

    #[error("marker '{marker}' has {length} characters, expected 2 or 3")]
    MarkerLength { marker: String, length: usize },

    #[error("extended marker '{variant}' maps to unknown family '{family}'")]
    UnknownBaseFamily { variant: String, family: String },

    #[error("extended marker '{0}' shadows a base family")]
    ExtendedShadowsFamily(String),

    #[error("empty string in {table} table")]
    EmptyEntry { table: &'static str },

    #[error("duplicate context-folio id '{0}'")]
    DuplicateFolio(String),

    #[error("zone order is empty")]
    NoZones,

    #[error("duplicate zone label '{0}'")]
    DuplicateZone(String),

    #[error("legality entry for middle '{middle}' names unknown zone '{zone}'")]
    UnknownLegalityZone { middle: String, zone: String },

    #[error(transparent)]
    ClassId(#[from] InvalidClassId),

    #[error("class {0} defined more than once")]
    DuplicateClass(u8),

    #[error("class catalog is missing classes {0:?}")]
    MissingClasses(Vec<u8>),

    #[error("decomposable class {0} has no required middles")]
    EmptyRequirement(u8),

    #[error("{kind} class {id} must not list required middles")]
    UnexpectedRequirement { id: u8, kind: &'static str },

    #[error("duplicate target id '{0}'")]
    DuplicateTarget(String),

    #[error("restricted_max_spread must be at least 1")]
    ZeroRestrictedSpread,
}
