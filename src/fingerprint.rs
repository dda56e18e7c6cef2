//! Content fingerprints and run manifests for determinism checks.
//!
//! Two runs over the same tables and registry must produce byte-identical
//! report streams; comparing manifests is enough to detect drift.

use chrono::{DateTime, Utc};
use reach_core::ReferenceTables;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::OutputError;

/// SHA-256 over the canonical JSON rendering of a table set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableFingerprint {
    pub hash: String,
}

impl TableFingerprint {
    /// Tables hold only ordered collections, so the rendering is stable.
    pub fn compute(tables: &ReferenceTables) -> Result<Self, OutputError> {
        let canonical = serde_json::to_vec(tables)?;
        let hash = hex::encode(Sha256::digest(&canonical));
        Ok(Self { hash })
    }

    /// First 16 hex characters.
    pub fn short(&self) -> &str {
        &self.hash[..16.min(self.hash.len())]
    }
}

/// SHA-256 over the exact report bytes emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputFingerprint {
    pub hash: String,
    pub reports: usize,
}

/// Provenance record written alongside a batch's reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub entries: usize,
    pub distinct_restricted_sets: usize,
    pub duration_ms: u64,
    pub tables: TableFingerprint,
    pub output: OutputFingerprint,
}

impl RunManifest {
    pub fn new(
        started_at: DateTime<Utc>,
        entries: usize,
        distinct_restricted_sets: usize,
        duration_ms: u64,
        tables: TableFingerprint,
        output: OutputFingerprint,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            entries,
            distinct_restricted_sets,
            duration_ms,
            tables,
            output,
        }
    }

    /// Same tables and same output, regardless of run id or timing.
    pub fn same_result(&self, other: &RunManifest) -> bool {
        self.tables == other.tables && self.output == other.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(hash: &str) -> OutputFingerprint {
        OutputFingerprint {
            hash: hash.into(),
            reports: 3,
        }
    }

    fn tables(hash: &str) -> TableFingerprint {
        TableFingerprint { hash: hash.into() }
    }

    #[test]
    fn manifests_compare_on_fingerprints_only() {
        let a = RunManifest::new(Utc::now(), 3, 2, 10, tables("t"), output("o"));
        let b = RunManifest::new(Utc::now(), 3, 3, 99, tables("t"), output("o"));
        let c = RunManifest::new(Utc::now(), 3, 2, 10, tables("t"), output("x"));

        assert_ne!(a.run_id, b.run_id);
        assert!(a.same_result(&b));
        assert!(!a.same_result(&c));
    }

    #[test]
    fn short_hash() {
        let fp = tables("0123456789abcdef0123");
        assert_eq!(fp.short(), "0123456789abcdef");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let m = RunManifest::new(Utc::now(), 1, 1, 0, tables("t"), output("o"));
        let json = serde_json::to_string(&m).unwrap();
        let back: RunManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_id, m.run_id);
        assert!(back.same_result(&m));
    }
}
