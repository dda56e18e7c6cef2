//! Pipeline stages
//!
//! Each stage is a pure function of its inputs and the frozen tables, so
//! every one can be exercised on its own:
//!
//! ```text
//! decompose ─► bundle ─► classify ─► compat ─► vocabulary ─► zone ─► reach
//! ```

pub mod bundle;
pub mod classify;
pub mod compat;
pub mod decompose;
pub mod reach;
pub mod vocabulary;
pub mod zone;

pub use bundle::{aggregate_bundle, aggregate_tokens, BundleAggregate};
pub use classify::{classify_middles, middle_class};
pub use compat::{compatible_folios, is_compatible};
pub use decompose::decompose_token;
pub use reach::{classify_target, reachable_classes, Reachability, ZoneReach};
pub use vocabulary::aggregate_as_union;
pub use zone::{
    legal_vocabularies, monotonicity_violations, zone_legal_vocabulary, MonotonicityViolation,
    ZoneVocabulary,
};
